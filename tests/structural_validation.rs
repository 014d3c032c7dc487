//! End-to-end checks of the structural validator against realistic manifests.

use compose_language_server::validators::validate;
use indoc::indoc;

#[test]
fn valid_manifest_passes() {
    let text = indoc! {"
        version: '3.8'
        services:
          web:
            image: nginx:alpine
            ports:
              - '80:80'
            volumes:
              - ./conf:/etc/nginx:ro
          worker:
            build: ./worker
            depends_on:
              - web

        volumes:
          data:
    "};
    let result = validate(text);
    assert!(result.is_valid, "unexpected error: {:?}", result.error);
    assert_eq!(result.error, None);
    assert_eq!(result.line, None);
}

#[test]
fn empty_and_whitespace_only_are_valid() {
    assert!(validate("").is_valid);
    assert!(validate("   \n").is_valid);
    assert!(validate("\n\n\t\n").is_valid);
}

#[test]
fn parse_failure_reports_a_line_within_the_document() {
    let text = "services:\n\tweb:\n    image: nginx\n";
    let result = validate(text);
    assert!(!result.is_valid);
    assert!(result.error.is_some());

    let line = result.line.expect("syntax errors carry a line");
    let line_count = text.lines().count();
    assert!(line >= 1, "line must be 1-based");
    assert!(line <= line_count, "line {line} beyond {line_count} lines");
}

#[test]
fn non_mapping_roots_are_rejected_without_line() {
    for text in ["- a\n- b", "hello", "42"] {
        let result = validate(text);
        assert!(!result.is_valid, "expected rejection of {text:?}");
        assert_eq!(
            result.error.as_deref(),
            Some("Document must be an object (Docker Compose root)")
        );
        assert_eq!(result.line, None);
    }
}

#[test]
fn service_without_image_or_build_names_the_service() {
    let text = indoc! {"
        services:
          frontend:
            image: node:18-alpine
          backend:
            ports:
              - '8080:8080'
    "};
    let result = validate(text);
    assert!(!result.is_valid);
    assert_eq!(
        result.error.as_deref(),
        Some("Service 'backend' must specify either 'image' or 'build'")
    );
}

#[test]
fn validation_stops_at_the_first_failing_service() {
    let text = indoc! {"
        services:
          first: broken
          second: also-broken
    "};
    let result = validate(text);
    assert_eq!(
        result.error.as_deref(),
        Some("Service 'first' must be a mapping configuration")
    );
}

#[test]
fn ports_and_volumes_shapes_are_checked() {
    let bad_ports = indoc! {"
        services:
          web:
            image: nginx
            ports: 80
    "};
    assert_eq!(
        validate(bad_ports).error.as_deref(),
        Some("Service 'web' ports must be a list")
    );

    let mapping_volumes = indoc! {"
        services:
          web:
            image: nginx
            volumes:
              data:
                driver: local
    "};
    assert!(validate(mapping_volumes).is_valid);
}

#[test]
fn root_whitelist_applies_only_without_services() {
    assert!(validate("networks:\n  backend:\n").is_valid);
    assert!(validate("x-defaults:\n  restart: always\n").is_valid);

    let result = validate("servces:\n  web:\n    image: nginx\n");
    assert_eq!(
        result.error.as_deref(),
        Some("Unknown root level key: 'servces'")
    );

    // With a services block present the whitelist never runs.
    let text = indoc! {"
        services:
          web:
            image: nginx
        servces: typo
    "};
    assert!(validate(text).is_valid);
}

#[test]
fn version_shape_is_checked() {
    assert!(validate("version: '3.8'\n").is_valid);
    assert_eq!(
        validate("version: 3.8\n").error.as_deref(),
        Some("'version' must be a string (e.g., '3.8')")
    );
}

#[test]
fn services_present_but_empty_is_valid() {
    assert!(validate("services: {}\n").is_valid);
}
