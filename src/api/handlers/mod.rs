use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::middleware::require;
use super::AppState;
use crate::access::{compose_layout, CurrentUser, Layout, View};
use crate::builder::{compute_totals, group_by_category, group_by_resource_key, FlatRate, ResourceBucket, Totals};
use crate::catalog::{
    self, CatalogClient, ClientError, OfferingDetailSummary, OfferingFacets, OfferingFilter, Page,
};
use crate::models::*;
use crate::pricing::estimate_offering;
use crate::report::{self, ReportFormat};

// ============================================================
// Error Handling
// ============================================================

/// Map an upstream catalog failure to a response.
/// Details are logged server-side; clients only see a short message.
fn catalog_error(e: ClientError) -> (StatusCode, String) {
    match e {
        ClientError::NotFound(_) => (StatusCode::NOT_FOUND, "Offering not found".to_string()),
        other => {
            tracing::error!("Catalog error: {}", other);
            (
                StatusCode::BAD_GATEWAY,
                "Catalog service unavailable".to_string(),
            )
        }
    }
}

fn catalog_client(state: &AppState) -> Result<&CatalogClient, (StatusCode, String)> {
    state.catalog.as_ref().ok_or_else(|| {
        tracing::warn!("Catalog URL is not configured");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "Catalog service not configured".to_string(),
        )
    })
}

fn flat_rate(state: &AppState, requested: Option<f64>) -> FlatRate {
    requested
        .and_then(FlatRate::checked)
        .unwrap_or(FlatRate(state.config.default_rate))
}

// ============================================================
// Health & Identity
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn me(Extension(user): Extension<CurrentUser>) -> Json<Layout> {
    Json(compose_layout(&user))
}

// ============================================================
// Canvas
// ============================================================

/// Upstream records for one offering.
#[derive(Debug, Serialize, Deserialize)]
pub struct SeedCanvasInput {
    pub activities: Vec<ActivityRecord>,
    #[serde(default)]
    pub staffing: Vec<StaffingRecord>,
    /// How many leading activities to place. Defaults to the configured seed count.
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub rate: Option<f64>,
}

/// Normalised activities and the canvas seeded from them.
#[derive(Debug, Serialize, Deserialize)]
pub struct SeededCanvas {
    pub available: Vec<Activity>,
    pub canvas: Canvas,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddActivityInput {
    #[serde(default)]
    pub canvas: Canvas,
    pub activity: Activity,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveActivityInput {
    pub canvas: Canvas,
    pub instance_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReorderCanvasInput {
    pub canvas: Canvas,
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CanvasInput {
    #[serde(default)]
    pub canvas: Canvas,
    /// Overrides the configured flat rate for this request.
    #[serde(default)]
    pub rate: Option<f64>,
}

/// One category of the canvas with its subtotals.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Option<String>,
    pub instance_ids: Vec<Uuid>,
    pub hours: u64,
    pub cost: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CanvasSummary {
    pub totals: TotalsSummary,
    pub categories: Vec<CategorySummary>,
    pub resources: Vec<ResourceSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TotalsSummary {
    pub weeks: u64,
    pub hours: u64,
    pub cost: f64,
}

impl From<Totals> for TotalsSummary {
    fn from(t: Totals) -> Self {
        Self {
            weeks: t.weeks,
            hours: t.hours,
            cost: t.cost,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResourceSummary {
    pub resource: String,
    pub role: String,
    pub band: u32,
    pub country: String,
    pub hours: u64,
    pub rate: f64,
    pub cost: f64,
}

impl From<ResourceBucket> for ResourceSummary {
    fn from(b: ResourceBucket) -> Self {
        Self {
            resource: b.label,
            role: b.key.role,
            band: b.key.band,
            country: b.key.country,
            hours: b.hours,
            rate: b.rate,
            cost: b.cost,
        }
    }
}

pub async fn seed_canvas(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<SeedCanvasInput>,
) -> Result<Json<SeededCanvas>, (StatusCode, String)> {
    require(&user, View::SolutionBuilder)?;

    let rates = flat_rate(&state, input.rate);
    let available = catalog::normalize_offering(&input.activities, &input.staffing, &rates);
    let count = input.count.unwrap_or(state.config.seed_count);
    let canvas = Canvas::seeded(&available, count);

    Ok(Json(SeededCanvas { available, canvas }))
}

pub async fn add_activity(
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<AddActivityInput>,
) -> Result<Json<Canvas>, (StatusCode, String)> {
    require(&user, View::SolutionBuilder)?;
    tracing::debug!(activity = %input.activity.name, "Adding activity to canvas");
    Ok(Json(input.canvas.add(input.activity)))
}

pub async fn remove_activity(
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<RemoveActivityInput>,
) -> Result<Json<Canvas>, (StatusCode, String)> {
    require(&user, View::SolutionBuilder)?;
    Ok(Json(input.canvas.remove(input.instance_id)))
}

pub async fn reorder_canvas(
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<ReorderCanvasInput>,
) -> Result<Json<Canvas>, (StatusCode, String)> {
    require(&user, View::SolutionBuilder)?;
    Ok(Json(input.canvas.reorder(input.from, input.to)))
}

pub async fn summarize_canvas(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<CanvasInput>,
) -> Result<Json<CanvasSummary>, (StatusCode, String)> {
    require(&user, View::SolutionBuilder)?;

    let rates = flat_rate(&state, input.rate);
    let canvas = &input.canvas;

    let categories = group_by_category(canvas)
        .into_iter()
        .map(|group| CategorySummary {
            category: group.category.map(str::to_string),
            instance_ids: group.activities.iter().map(|s| s.instance_id).collect(),
            hours: group
                .activities
                .iter()
                .map(|s| u64::from(s.activity.hours))
                .sum(),
            cost: group.activities.iter().map(|s| s.activity.cost).sum(),
        })
        .collect();

    Ok(Json(CanvasSummary {
        totals: compute_totals(canvas).into(),
        categories,
        resources: group_by_resource_key(canvas, &rates)
            .into_iter()
            .map(Into::into)
            .collect(),
    }))
}

// ============================================================
// Catalog
// ============================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchCatalogInput {
    pub available: Vec<Activity>,
    #[serde(default)]
    pub canvas: Canvas,
    #[serde(default)]
    pub query: String,
    /// 1-based page. Defaults to the first page.
    #[serde(default)]
    pub page: Option<usize>,
}

pub async fn search_catalog(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<SearchCatalogInput>,
) -> Result<Json<Page<Activity>>, (StatusCode, String)> {
    require(&user, View::Catalog)?;

    let matches: Vec<Activity> = catalog::search(&input.available, &input.query, &input.canvas)
        .into_iter()
        .cloned()
        .collect();
    let page = input.page.unwrap_or(1);

    Ok(Json(catalog::paginate(&matches, page, state.config.page_size)))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BrowseOfferingsInput {
    /// Offerings to browse. Fetched from the upstream catalog when absent.
    #[serde(default)]
    pub offerings: Option<Vec<OfferingRecord>>,
    #[serde(default)]
    pub filter: OfferingFilter,
    #[serde(default)]
    pub page: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OfferingCatalogPage {
    pub facets: OfferingFacets,
    #[serde(flatten)]
    pub page: Page<OfferingRecord>,
}

pub async fn browse_offerings(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<BrowseOfferingsInput>,
) -> Result<Json<OfferingCatalogPage>, (StatusCode, String)> {
    require(&user, View::Catalog)?;

    let offerings = match input.offerings {
        Some(offerings) => offerings,
        None => catalog_client(&state)?
            .get_offerings()
            .await
            .map_err(catalog_error)?,
    };

    let matches: Vec<OfferingRecord> = catalog::filter_offerings(&offerings, &input.filter)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(OfferingCatalogPage {
        facets: catalog::offering_facets(&offerings),
        page: catalog::paginate(&matches, input.page.unwrap_or(1), catalog::OFFERING_PAGE_SIZE),
    }))
}

/// Effort and price roll-up of an offering's activities, grouped by block.
pub async fn offering_detail(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(offering_id): Path<Uuid>,
) -> Result<Json<OfferingDetailSummary>, (StatusCode, String)> {
    require(&user, View::OfferingDetail)?;

    let records = catalog_client(&state)?
        .get_activities(offering_id)
        .await
        .map_err(catalog_error)?;

    Ok(Json(catalog::summarize_offering(
        &records,
        &FlatRate::offering_detail(),
    )))
}

/// Fetch an offering from the upstream catalog and seed a canvas from it.
pub async fn offering_canvas(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(offering_id): Path<Uuid>,
) -> Result<Json<SeededCanvas>, (StatusCode, String)> {
    require(&user, View::SolutionBuilder)?;

    let client = catalog_client(&state)?;
    let data = client
        .get_offering_data(offering_id)
        .await
        .map_err(catalog_error)?;

    let rates = flat_rate(&state, None);
    let available = catalog::normalize_offering(&data.activities, &data.staffing, &rates);
    let canvas = Canvas::seeded(&available, state.config.seed_count);
    tracing::info!(
        %offering_id,
        activities = available.len(),
        seeded = canvas.len(),
        "Seeded canvas from catalog"
    );

    Ok(Json(SeededCanvas { available, canvas }))
}

/// Hours and prices for an offering using the real pricing table.
pub async fn offering_estimate(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(offering_id): Path<Uuid>,
) -> Result<Json<OfferingEstimate>, (StatusCode, String)> {
    require(&user, View::Catalog)?;

    let client = catalog_client(&state)?;
    let (staffing, pricing) = tokio::try_join!(
        client.get_staffing(offering_id),
        client.get_pricing()
    )
    .map_err(catalog_error)?;

    Ok(Json(estimate_offering(
        offering_id.to_string(),
        &staffing,
        &pricing,
    )))
}

// ============================================================
// Reports
// ============================================================

pub async fn render_report(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(format): Path<String>,
    Json(input): Json<CanvasInput>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    require(&user, View::SolutionBuilder)?;

    let format = ReportFormat::from_str(&format).ok_or((
        StatusCode::NOT_FOUND,
        format!("Unknown report format: {}", format),
    ))?;
    let rates = flat_rate(&state, input.rate);
    let text = report::render(&input.canvas, format, &rates);
    tracing::debug!(
        format = format.as_str(),
        activities = input.canvas.len(),
        "Rendered report"
    );

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    ))
}
