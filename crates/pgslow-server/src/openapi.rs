//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::dto::{HealthResponse, ServiceStatus, SlowQueryLogDto};
use crate::handlers::{demo, health, slow_queries};

/// OpenAPI documentation for the pgslow API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "pgslow API",
        version = "1.0.0",
        description = "Paginated access to PostgreSQL `pg_stat_statements`.

## Quick Start

1. Seed demo data: `GET /demo/init`
2. List the slowest statements: `GET /slow-queries`
3. Filter and page: `GET /slow-queries?query_type=select&order_by=asc&page=1&page_size=20`
",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        slow_queries::list_slow_queries,
        demo::init_demo,
        health::health_check,
    ),
    components(
        schemas(SlowQueryLogDto, HealthResponse, ServiceStatus)
    ),
    tags(
        (name = "slow-queries", description = "Statement statistics"),
        (name = "demo", description = "Demo data seeding"),
        (name = "system", description = "Health and metadata")
    )
)]
pub struct ApiDoc;
