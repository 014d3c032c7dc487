//! Static completion vocabularies.
//!
//! Each table is a fixed ordered list: declaration order is the curated
//! "most common first" ranking and is preserved all the way to the client,
//! never sorted alphabetically.

/// Keys accepted at the root of a Compose manifest.
pub const ROOT_KEYS: &[&str] = &[
    "version", "services", "volumes", "networks", "secrets", "configs",
];

/// Keys accepted inside a service definition.
pub const SERVICE_KEYS: &[&str] = &[
    "image", "build", "ports", "volumes", "environment", "env_file",
    "depends_on", "restart", "command", "entrypoint", "networks",
    "container_name", "hostname", "healthcheck", "deploy", "logging",
    "stdin_open", "tty", "working_dir", "user",
];

/// Frequently used registry images, suggested after `image:`.
pub const COMMON_IMAGES: &[&str] = &[
    "node:18-alpine", "node:20-alpine", "node:latest",
    "postgres:15", "postgres:14", "postgres:alpine",
    "redis:alpine", "redis:latest",
    "mongo:latest", "mongo:6",
    "nginx:alpine", "nginx:latest",
    "mysql:8", "mysql:5.7",
    "wordpress:latest", "wordpress:php8.2",
    "python:3.11-alpine", "python:3.10-slim",
    "traefik:v2.10", "rabbitmq:3-management",
];

/// Dockerfile instruction keywords.
pub const DOCKERFILE_INSTRUCTIONS: &[&str] = &[
    "FROM", "RUN", "CMD", "LABEL", "EXPOSE", "ENV", "ADD", "COPY",
    "ENTRYPOINT", "VOLUME", "USER", "WORKDIR", "ARG", "ONBUILD",
    "STOPSIGNAL", "HEALTHCHECK", "SHELL",
];
