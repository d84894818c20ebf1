//! Embedded artifact templates
//!
//! One minijinja template per artifact kind. The environment runs with
//! `trim_blocks` and `lstrip_blocks`, so block tags may sit on their own
//! lines without leaving blank lines behind.

/// Transfer object
pub const DTO: &str = r"package {{ package }};

{% if embedded_fields %}
import jakarta.persistence.Embedded;
{% endif %}
{% if identifier %}
import jakarta.validation.constraints.NotNull;
{% endif %}
{% if has_bounds %}
import jakarta.validation.constraints.Size;
{% endif %}
import lombok.AllArgsConstructor;
import lombok.Data;
import lombok.NoArgsConstructor;
import lombok.experimental.SuperBuilder;

@SuperBuilder
@Data
@AllArgsConstructor
@NoArgsConstructor
public class {{ class_name }} {
{% for field in fields %}

{% if field.is_identifier %}
    @NotNull
{% endif %}
{% if field.is_embedded %}
    @Embedded
{% endif %}
{% if field.max_length is not none %}
    @Size(max = {{ field.max_length }})
{% endif %}
    private {{ field.type }} {{ field.name }};
{% endfor %}
}
";

/// Plain value object
pub const VALUE_OBJECT: &str = r"package {{ package }};

{% if constants %}
import jakarta.validation.constraints.Size;
{% endif %}
import lombok.AllArgsConstructor;
import lombok.Data;
import lombok.NoArgsConstructor;
import lombok.experimental.SuperBuilder;

@SuperBuilder
@Data
@AllArgsConstructor
@NoArgsConstructor
public class {{ class_name }} {
{% if constants %}

{% for constant in constants %}
    private static final int {{ constant.name }} = {{ constant.value }};
{% endfor %}
{% endif %}
{% for field in plain_fields %}

{% if field.length_constant is not none %}
    @Size(max = {{ field.length_constant }})
{% endif %}
    private {{ field.type }} {{ field.name }};
{% endfor %}
}
";

/// Persistence-access interface
pub const REPOSITORY: &str = r"package {{ package }};

import {{ entity.qualified }};
import org.springframework.data.jpa.repository.JpaSpecificationExecutor;
import org.springframework.data.repository.CrudRepository;
import org.springframework.stereotype.Repository;

@Repository
public interface {{ class_name }} extends CrudRepository<{{ entity.name }}, {{ id_type }}>, JpaSpecificationExecutor<{{ entity.name }}> {
}
";

/// Create handler
pub const CREATE_SERVICE: &str = r"package {{ package }};

import {{ types.mapper.qualified }};
import {{ types.dto.qualified }};
import {{ types.value_object.qualified }};
import {{ types.repository.qualified }};
import lombok.RequiredArgsConstructor;
import org.springframework.stereotype.Service;

@RequiredArgsConstructor
@Service
public class {{ class_name }} {
    private final {{ types.repository.name }} repository;

    public {{ types.dto.name }} create(final {{ types.value_object.name }} {{ variable_name }}) {
        return {{ types.mapper.name }}.toDto(repository.save({{ types.mapper.name }}.toEntity({{ variable_name }})));
    }
}
";

/// Find handler
pub const FIND_SERVICE: &str = r#"package {{ package }};

import {{ root_package }}.exceptions.ResourceNotFoundException;
import {{ entity.qualified }};
import {{ types.repository.qualified }};
import lombok.RequiredArgsConstructor;
import org.springframework.stereotype.Service;

@RequiredArgsConstructor
@Service
public class {{ class_name }} {
    private final {{ types.repository.name }} repository;

    public {{ entity.name }} find(final {{ id_type }} {{ id_param }}) {
        return repository.findById({{ id_param }})
                         .orElseThrow(() -> new ResourceNotFoundException("Not found " + {{ id_param }}));
    }
}
"#;

/// Patch handler
pub const PATCH_SERVICE: &str = r"package {{ package }};

import {{ types.mapper.qualified }};
import {{ entity.qualified }};
import {{ types.value_object.qualified }};
import {{ types.repository.qualified }};
import {{ root_package }}.utils.PatchUtils;
import lombok.RequiredArgsConstructor;
import org.springframework.stereotype.Service;

@RequiredArgsConstructor
@Service
public class {{ class_name }} {
    private final {{ types.find_service.name }} service;
    private final {{ types.repository.name }} repository;

    public void patch(final {{ id_type }} {{ id_param }}, final {{ types.value_object.name }} {{ variable_name }}Patch) {
        final {{ entity.name }} existingEntity = service.find({{ id_param }});
        final {{ entity.name }} patchedEntity = {{ types.mapper.name }}.toEntity({{ variable_name }}Patch);
        repository.save(PatchUtils.merge(existingEntity, patchedEntity));
    }
}
";

/// Delete handler
pub const DELETE_SERVICE: &str = r"package {{ package }};

import {{ types.repository.qualified }};
import lombok.RequiredArgsConstructor;
import org.springframework.stereotype.Service;

@RequiredArgsConstructor
@Service
public class {{ class_name }} {
    private final {{ types.repository.name }} repository;

    public void delete(final {{ id_type }} {{ id_param }}) {
        repository.deleteById({{ id_param }});
    }
}
";

/// Search handler
pub const SEARCH_SERVICE: &str = r"package {{ package }};

import {{ types.specification_factory.qualified }};
import {{ types.mapper.qualified }};
import {{ types.dto.qualified }};
import {{ types.repository.qualified }};
import {{ types.search_model.qualified }};
import lombok.RequiredArgsConstructor;
import org.springframework.data.domain.Pageable;
import org.springframework.stereotype.Service;

import java.util.Collection;

@RequiredArgsConstructor
@Service
public class {{ class_name }} {
    private final {{ types.repository.name }} repository;

    public Collection<{{ types.dto.name }}> search(final {{ types.search_model.name }} searchModel, final Pageable pageable) {
        return repository.findAll({{ types.specification_factory.name }}.mapToSpecification(searchModel), pageable)
                         .map({{ types.mapper.name }}::toDto)
                         .getContent();
    }
}
";

/// Create entry point
pub const POST_CONTROLLER: &str = r#"package {{ package }};

{% if render.audit %}
import {{ root_package }}.annotations.Audit;
import {{ root_package }}.enums.AuditAction;
{% endif %}
import {{ types.dto.qualified }};
import {{ types.value_object.qualified }};
import {{ types.create_service.qualified }};
import jakarta.validation.Valid;
import lombok.RequiredArgsConstructor;
import org.springframework.http.HttpStatus;
import org.springframework.http.ResponseEntity;
import org.springframework.web.bind.annotation.PostMapping;
import org.springframework.web.bind.annotation.RequestBody;
import org.springframework.web.bind.annotation.RequestMapping;
import org.springframework.web.bind.annotation.RestController;

@RequiredArgsConstructor
@RestController
@RequestMapping("{{ route }}")
public class {{ class_name }} {
{% if render.audit %}
    private static final long {{ controller_constant }} = {{ render.controller_id }};

{% endif %}
    private final {{ types.create_service.name }} service;

{% if render.audit %}
    @Audit(controllerId = {{ controller_constant }}, action = AuditAction.POST)
{% endif %}
    @PostMapping
    public ResponseEntity<{{ types.dto.name }}> create(@Valid @RequestBody final {{ types.value_object.name }} {{ variable_name }}) {
        return new ResponseEntity<>(service.create({{ variable_name }}), HttpStatus.CREATED);
    }
}
"#;

/// Find entry point
pub const GET_CONTROLLER: &str = r#"package {{ package }};

import {{ types.mapper.qualified }};
import {{ types.dto.qualified }};
import {{ types.find_service.qualified }};
import lombok.RequiredArgsConstructor;
import org.springframework.http.ResponseEntity;
import org.springframework.web.bind.annotation.GetMapping;
import org.springframework.web.bind.annotation.PathVariable;
import org.springframework.web.bind.annotation.RequestMapping;
import org.springframework.web.bind.annotation.RestController;

@RequiredArgsConstructor
@RestController
@RequestMapping("{{ route }}")
public class {{ class_name }} {
    private final {{ types.find_service.name }} service;

    @GetMapping("{{ item_path }}")
    public ResponseEntity<{{ types.dto.name }}> get(@PathVariable final {{ id_type }} {{ id_param }}) {
        return ResponseEntity.ok({{ types.mapper.name }}.toDto(service.find({{ id_param }})));
    }
}
"#;

/// Patch entry point
pub const PATCH_CONTROLLER: &str = r#"package {{ package }};

{% if render.audit %}
import {{ root_package }}.annotations.Audit;
import {{ root_package }}.enums.AuditAction;
{% endif %}
import {{ types.value_object.qualified }};
import {{ types.patch_service.qualified }};
import lombok.RequiredArgsConstructor;
import org.springframework.http.ResponseEntity;
import org.springframework.web.bind.annotation.PatchMapping;
import org.springframework.web.bind.annotation.PathVariable;
import org.springframework.web.bind.annotation.RequestBody;
import org.springframework.web.bind.annotation.RequestMapping;
import org.springframework.web.bind.annotation.RestController;

@RequiredArgsConstructor
@RestController
@RequestMapping("{{ route }}")
public class {{ class_name }} {
{% if render.audit %}
    private static final long {{ controller_constant }} = {{ render.controller_id }};

{% endif %}
    private final {{ types.patch_service.name }} service;

{% if render.audit %}
    @Audit(controllerId = {{ controller_constant }}, action = AuditAction.PATCH)
{% endif %}
    @PatchMapping("{{ item_path }}")
    public ResponseEntity<Void> patch(@PathVariable final {{ id_type }} {{ id_param }}, @RequestBody final {{ types.value_object.name }} {{ variable_name }}) {
        service.patch({{ id_param }}, {{ variable_name }});
        return ResponseEntity.noContent().build();
    }
}
"#;

/// Delete entry point
pub const DELETE_CONTROLLER: &str = r#"package {{ package }};

{% if render.audit %}
import {{ root_package }}.annotations.Audit;
import {{ root_package }}.enums.AuditAction;
{% endif %}
import {{ types.delete_service.qualified }};
import lombok.RequiredArgsConstructor;
import org.springframework.http.ResponseEntity;
import org.springframework.web.bind.annotation.DeleteMapping;
import org.springframework.web.bind.annotation.PathVariable;
import org.springframework.web.bind.annotation.RequestMapping;
import org.springframework.web.bind.annotation.RestController;

@RequiredArgsConstructor
@RestController
@RequestMapping("{{ route }}")
public class {{ class_name }} {
{% if render.audit %}
    private static final long {{ controller_constant }} = {{ render.controller_id }};

{% endif %}
    private final {{ types.delete_service.name }} service;

{% if render.audit %}
    @Audit(controllerId = {{ controller_constant }}, action = AuditAction.DELETE)
{% endif %}
    @DeleteMapping("{{ item_path }}")
    public ResponseEntity<Void> delete(@PathVariable final {{ id_type }} {{ id_param }}) {
        service.delete({{ id_param }});
        return ResponseEntity.noContent().build();
    }
}
"#;

/// Search entry point
pub const SEARCH_CONTROLLER: &str = r#"package {{ package }};

import {{ types.dto.qualified }};
import {{ types.search_model.qualified }};
import {{ types.search_service.qualified }};
import lombok.RequiredArgsConstructor;
import org.springframework.data.domain.Pageable;
import org.springframework.http.ResponseEntity;
import org.springframework.web.bind.annotation.GetMapping;
import org.springframework.web.bind.annotation.RequestMapping;
import org.springframework.web.bind.annotation.RestController;

import java.util.Collection;

@RequiredArgsConstructor
@RestController
@RequestMapping("{{ route }}")
public class {{ class_name }} {
    private final {{ types.search_service.name }} service;

    @GetMapping
    public ResponseEntity<Collection<{{ types.dto.name }}>> search(final {{ types.search_model.name }} searchModel,
                                                                   final Pageable pageable) {
        return ResponseEntity.ok(service.search(searchModel, pageable));
    }
}
"#;

/// Search/filter model
pub const SEARCH_MODEL: &str = r"package {{ package }};

{% if embedded_fields %}
import jakarta.persistence.Embedded;
{% endif %}
import lombok.Data;

@Data
public class {{ class_name }} {
{% for field in fields %}

{% if field.is_embedded %}
    @Embedded
{% endif %}
    private {{ field.type }} {{ field.name }};
{% endfor %}
}
";

/// Predicate builder
pub const SPECIFICATIONS: &str = r#"package {{ package }};

import {{ entity.qualified }};
import lombok.experimental.UtilityClass;
import org.springframework.data.jpa.domain.Specification;

@UtilityClass
public class {{ class_name }} {

    public static Specification<{{ entity.name }}> empty() {
        return (root, query, builder) -> builder.conjunction();
    }
{% for field in plain_fields %}

    public static Specification<{{ entity.name }}> {{ field.name }}(final {{ field.type }} {{ field.name }}) {
        return (root, query, builder) -> builder.equal(root.get("{{ field.name }}"), {{ field.name }});
    }
{% endfor %}
}
"#;

/// Predicate factory
pub const SPECIFICATION_FACTORY: &str = r"package {{ package }};

import {{ entity.qualified }};
import {{ types.search_model.qualified }};
import {{ types.specifications.qualified }};
import lombok.experimental.UtilityClass;
import org.springframework.data.jpa.domain.Specification;

import java.util.LinkedList;
import java.util.List;
import java.util.Optional;

@UtilityClass
public class {{ class_name }} {

    public Specification<{{ entity.name }}> mapToSpecification(final {{ types.search_model.name }} searchModel) {

        final List<Specification<{{ entity.name }}>> specifications = new LinkedList<>();
{% for field in plain_fields %}

        Optional.ofNullable(searchModel.get{{ field.accessor }}())
                .map({{ types.specifications.name }}::{{ field.name }})
                .ifPresent(specifications::add);
{% endfor %}

        return specifications.stream()
                .reduce(Specification::and)
                .orElse({{ types.specifications.name }}.empty());
    }
}
";

/// Object mapper
pub const MAPPER: &str = r"package {{ package }};

import com.fasterxml.jackson.databind.ObjectMapper;
import {{ root_package }}.factories.ObjectMapperFactory;
import {{ types.dto.qualified }};
import {{ entity.qualified }};
import {{ types.value_object.qualified }};
import lombok.experimental.UtilityClass;

@UtilityClass
public class {{ class_name }} {
    private static final ObjectMapper OBJECT_MAPPER = ObjectMapperFactory.create();

    public static {{ types.dto.name }} toDto(final {{ entity.name }} entity) {
        return OBJECT_MAPPER.convertValue(entity, {{ types.dto.name }}.class);
    }

    public static {{ entity.name }} toEntity(final {{ types.value_object.name }} pojo) {
        return OBJECT_MAPPER.convertValue(pojo, {{ entity.name }}.class);
    }
}
";
