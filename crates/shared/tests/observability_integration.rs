//! 可观测性与配置集成测试
//!
//! 测试中间件在真实路由中的行为，以及配置文件到配置结构体的反序列化。

// ============================================================================
// 中间件测试
// ============================================================================

mod middleware_tests {
    use axum::{
        Extension, Router,
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
    };
    use family_shared::observability::middleware::{
        REQUEST_ID_HEADER, RequestId, http_tracing, request_id,
    };
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route(
                "/families/{id}",
                get(|Extension(id): Extension<RequestId>| async move { id.as_str().to_string() }),
            )
            .layer(middleware::from_fn(http_tracing))
            .layer(middleware::from_fn(request_id))
    }

    #[tokio::test]
    async fn test_handler_sees_request_id_extension() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/families/1")
                    .header(REQUEST_ID_HEADER, "trace-me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"trace-me");
    }

    #[tokio::test]
    async fn test_unmatched_route_still_gets_request_id() {
        let response = app()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }
}

// ============================================================================
// 配置反序列化测试
// ============================================================================

mod config_tests {
    use config::{Config, File, FileFormat};
    use family_shared::config::{AppConfig, StorageBackend};

    fn parse(toml: &str) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_partial_sections_fall_back_to_defaults() {
        let config = parse(
            r#"
            [server]
            port = 9000

            [storage]
            backend = "memory"
            "#,
        );

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.storage.create_schema);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.observability.metrics_port, 9090);
    }

    #[test]
    fn test_observability_section() {
        let config = parse(
            r#"
            [observability]
            log_level = "debug"
            json_logs = true
            metrics_enabled = false
            "#,
        );

        assert_eq!(config.observability.log_level, "debug");
        assert!(config.observability.json_logs);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result = Config::builder()
            .add_source(File::from_str("[storage]\nbackend = \"sqlite\"", FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize::<AppConfig>();

        assert!(result.is_err());
    }
}
