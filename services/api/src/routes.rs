use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use placement_ai::workflows::placement::{
    eligibility_router, EligibilityService, PlacementRepository,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_eligibility_routes<R>(service: Arc<EligibilityService<R>>) -> axum::Router
where
    R: PlacementRepository + 'static,
{
    eligibility_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryPlacementRepository;
    use axum::body::Body;
    use axum::http::Request;
    use placement_ai::workflows::placement::{
        Drive, DriveId, EligibilityField, EligibilityRule, RuleOperator, StudentId,
        StudentProfile,
    };
    use tower::ServiceExt;

    fn repository() -> InMemoryPlacementRepository {
        let student = StudentProfile {
            id: StudentId("stu-9".to_string()),
            name: "Dev".to_string(),
            branch: "IT".to_string(),
            batch: "2025".to_string(),
            gender: None,
            current_cgpa: 8.3,
            active_backlogs: 0,
            tenth_percentage: 90.0,
            twelfth_percentage: 88.0,
            programming_languages: vec!["TypeScript".to_string()],
            frameworks: Vec::new(),
            tools: Vec::new(),
            internships: Vec::new(),
        };
        let drive = Drive {
            id: DriveId("drv-9".to_string()),
            company: "Hooli".to_string(),
            role: "SDE".to_string(),
            rules: vec![EligibilityRule::new(
                EligibilityField::Cgpa,
                RuleOperator::GreaterThan,
                8.0,
            )],
            allow_partially_eligible: false,
            deadline: None,
        };
        InMemoryPlacementRepository::with_records(vec![student], vec![drive])
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn stored_eligibility_is_routed() {
        let service = Arc::new(EligibilityService::new(Arc::new(repository())));
        let router = with_eligibility_routes(service);

        let response = router
            .oneshot(
                Request::get("/api/v1/students/stu-9/drives/drv-9/eligibility")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json payload");
        assert_eq!(payload["eligible"], json!(true));
        assert_eq!(
            payload["results"][0]["message"],
            json!("✅ CGPA: 8.3 (Required: > 8)")
        );
    }

    #[tokio::test]
    async fn unknown_drive_is_not_found() {
        let service = Arc::new(EligibilityService::new(Arc::new(repository())));
        let router = with_eligibility_routes(service);

        let response = router
            .oneshot(
                Request::get("/api/v1/drives/drv-missing/cohort")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
