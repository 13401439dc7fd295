use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the Goodgle Forme flag API.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::flags::all_flags,
        crate::routes::flags::put_boldness,
        crate::routes::flags::put_execution,
        crate::routes::flags::put_humor,
        crate::routes::flags::put_creativity,
        crate::routes::flags::put_presentation,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::flags::FlagsResponse,
            crate::dto::flags::MessageResponse,
            crate::dto::flags::BoldnessToggle,
            crate::dto::flags::ExecutionToggle,
            crate::dto::flags::HumorToggle,
            crate::dto::flags::CreativityToggle,
            crate::dto::flags::PresentationToggle,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "flags", description = "Per-gag feature flags"),
    )
)]
pub struct ApiDoc;
