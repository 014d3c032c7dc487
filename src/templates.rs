//! Curated Compose starter templates, surfaced through the
//! `compose.template.*` commands.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateCategory {
    Basic,
    Database,
    FullStack,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: TemplateCategory,
    /// Full manifest text, applied through `compose.template.apply`; not part
    /// of the listing payload.
    #[serde(skip_serializing)]
    pub content: &'static str,
}

/// Looks up a template by its stable id.
pub fn find(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|template| template.id == id)
}

pub const TEMPLATES: &[Template] = &[
    Template {
        id: "basic-node",
        name: "Node.js Service",
        description: "A simple Node.js application container.",
        category: TemplateCategory::Basic,
        content: "version: '3.8'
services:
  web:
    image: node:18-alpine
    working_dir: /app
    volumes:
      - .:/app
    ports:
      - \"3000:3000\"
    command: npm start
",
    },
    Template {
        id: "postgres",
        name: "PostgreSQL DB",
        description: "PostgreSQL database with environment variables.",
        category: TemplateCategory::Database,
        content: "version: '3.8'
services:
  db:
    image: postgres:15
    environment:
      POSTGRES_USER: user
      POSTGRES_PASSWORD: password
      POSTGRES_DB: mydatabase
    volumes:
      - postgres_data:/var/lib/postgresql/data
    ports:
      - \"5432:5432\"

volumes:
  postgres_data:
",
    },
    Template {
        id: "redis",
        name: "Redis Cache",
        description: "Redis service with persistent volume.",
        category: TemplateCategory::Database,
        content: "version: '3.8'
services:
  redis:
    image: redis:alpine
    ports:
      - \"6379:6379\"
    volumes:
      - redis_data:/data

volumes:
  redis_data:
",
    },
    Template {
        id: "full-stack-mern",
        name: "MERN Stack",
        description: "Mongo, Express (Node), React, Node setup.",
        category: TemplateCategory::FullStack,
        content: "version: '3.8'
services:
  client:
    image: node:18-alpine
    build: ./client
    ports:
      - \"3000:3000\"
    stdin_open: true
    tty: true

  server:
    image: node:18-alpine
    build: ./server
    ports:
      - \"5000:5000\"
    environment:
      MONGO_URI: mongodb://mongo:27017/appdb
    depends_on:
      - mongo

  mongo:
    image: mongo:latest
    ports:
      - \"27017:27017\"
    volumes:
      - mongo_data:/data/db

volumes:
  mongo_data:
",
    },
    Template {
        id: "nginx-proxy",
        name: "Nginx Reverse Proxy",
        description: "Nginx configured as a reverse proxy.",
        category: TemplateCategory::Basic,
        content: "version: '3.8'
services:
  proxy:
    image: nginx:alpine
    ports:
      - \"80:80\"
    volumes:
      - ./nginx.conf:/etc/nginx/nginx.conf:ro
    depends_on:
      - app

  app:
    image: my-app:latest
",
    },
    Template {
        id: "wordpress",
        name: "WordPress",
        description: "WordPress with MySQL database.",
        category: TemplateCategory::FullStack,
        content: "version: '3.8'
services:
  wordpress:
    image: wordpress:latest
    ports:
      - \"8000:80\"
    environment:
      WORDPRESS_DB_HOST: db
      WORDPRESS_DB_USER: exampleuser
      WORDPRESS_DB_PASSWORD: examplepass
      WORDPRESS_DB_NAME: exampledb
    volumes:
      - wordpress_data:/var/www/html
    depends_on:
      - db

  db:
    image: mysql:5.7
    environment:
      MYSQL_DATABASE: exampledb
      MYSQL_USER: exampleuser
      MYSQL_PASSWORD: examplepass
      MYSQL_RANDOM_ROOT_PASSWORD: '1'
    volumes:
      - db_data:/var/lib/mysql

volumes:
  wordpress_data:
  db_data:
",
    },
];
