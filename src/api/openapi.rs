//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::import_handler;
use crate::domain::{ImportSummary, ImportUserInput, ImportUserRecord, UserRole};

/// OpenAPI documentation for the PeerIQ import service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PeerIQ User Import",
        version = "0.1.0",
        description = "Bulk, idempotent creation of PeerIQ users from validated CSV records",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        import_handler::import_users,
    ),
    components(
        schemas(
            UserRole,
            ImportUserRecord,
            ImportUserInput,
            ImportSummary,
            import_handler::ImportUsersRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Import", description = "Bulk user import")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT issued by `peeriq token`"))
                        .build(),
                ),
            );
        }
    }
}
