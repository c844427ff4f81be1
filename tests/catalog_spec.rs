use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
use solution_builder::builder::FlatRate;
use solution_builder::catalog::*;
use solution_builder::models::*;
use uuid::Uuid;

fn record(name: &str, category: Option<&str>) -> ActivityRecord {
    ActivityRecord {
        activity_id: Uuid::new_v4(),
        activity_name: name.to_string(),
        category: category.map(str::to_string),
        ..ActivityRecord::default()
    }
}

fn available() -> Vec<Activity> {
    let records = vec![
        record("Discovery Workshop", Some("Assessment")),
        record("Design Review", Some("Assessment")),
        record("Migration Wave", Some("Delivery")),
        record("Handover", None),
    ];
    normalize_offering(&records, &[], &FlatRate::default())
}

fn names<'a>(activities: &[&'a Activity]) -> Vec<&'a str> {
    activities.iter().map(|a| a.name.as_str()).collect()
}

mod search_activities {
    use super::*;

    #[test]
    fn empty_query_returns_everything_in_order() {
        let available = available();
        let found = search(&available, "", &Canvas::new());
        assert_eq!(
            names(&found),
            vec!["Discovery Workshop", "Design Review", "Migration Wave", "Handover"]
        );
    }

    #[test]
    fn matches_name_or_category_ignoring_case() {
        let available = available();
        assert_eq!(names(&search(&available, "REVIEW", &Canvas::new())), vec!["Design Review"]);
        assert_eq!(
            names(&search(&available, "delivery", &Canvas::new())),
            vec!["Migration Wave"]
        );
    }

    #[test]
    fn matches_the_general_label_for_uncategorized_activities() {
        let available = available();
        assert_eq!(names(&search(&available, "general", &Canvas::new())), vec!["Handover"]);
    }

    #[test]
    fn activities_on_the_canvas_come_first() {
        let available = available();
        let canvas = Canvas::new().add(available[2].clone());
        let found = search(&available, "", &canvas);
        assert_eq!(
            names(&found),
            vec!["Migration Wave", "Discovery Workshop", "Design Review", "Handover"]
        );
    }
}

mod pagination {
    use super::*;

    #[test]
    fn splits_into_pages_of_the_given_size() {
        let items: Vec<u32> = (1..=10).collect();
        let page = paginate(&items, 2, DEFAULT_PAGE_SIZE);
        assert_eq!(page.items, vec![9, 10]);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.total_items, 10);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let items: Vec<u32> = (1..=3).collect();
        let page = paginate(&items, 5, 2);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 2);
    }
}

mod normalization {
    use super::*;

    #[test]
    fn staffing_drives_hours_and_cost() {
        let mut rec = record("Build", Some("Delivery"));
        rec.effort_hours = Some(999);
        let staffing = vec![StaffingRecord {
            staffing_id: None,
            activity_id: rec.activity_id,
            country: "US".to_string(),
            role: "Consultant".to_string(),
            band: 8,
            hours: Some(20),
        }];

        let activity = normalize_activity(&rec, &staffing, &FlatRate(150.0));
        assert_eq!(activity.hours, 20);
        assert_eq!(activity.cost, 3000.0);
        assert_eq!(activity.staffing.len(), 1);
    }

    #[test]
    fn unstaffed_activity_uses_defaults() {
        let activity = normalize_activity(&record("Bare", None), &[], &FlatRate::default());
        assert_eq!(activity.duration_weeks, 1);
        assert_eq!(activity.hours, DEFAULT_HOURS);
        assert_eq!(activity.cost, 0.0);
        assert_eq!(activity.scope, "Activity scope");
        assert_eq!(activity.display_category(), DEFAULT_CATEGORY);
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let mut rec = record("Blank", None);
        rec.description = Some(String::new());
        rec.assumptions = Some(String::new());
        let activity = normalize_activity(&rec, &[], &FlatRate::default());
        assert_eq!(activity.scope, "Activity scope");
        assert_eq!(activity.assumptions, "Standard assumptions apply");
    }
}

mod offering_catalog {
    use super::*;

    fn offering(name: &str, brand: &str, saas: &str, duration: Option<&str>) -> OfferingRecord {
        OfferingRecord {
            offering_id: Uuid::new_v4(),
            offering_name: name.to_string(),
            brand: Some(brand.to_string()),
            saas_type: Some(saas.to_string()),
            duration: duration.map(str::to_string),
            ..OfferingRecord::default()
        }
    }

    fn catalog() -> Vec<OfferingRecord> {
        let mut envizi = offering("envizi Onboarding", "Envizi", "SaaS", Some("6 weeks"));
        envizi.tag_line = Some("Sustainability reporting in weeks".to_string());
        let mut maximo = offering("Maximo Upgrade", "Maximo", "On-prem", Some("12 weeks"));
        maximo.offering_summary = Some("Move to the latest MAS release".to_string());
        maximo.product_id = Some(Uuid::from_u128(7));
        vec![
            maximo,
            envizi,
            offering("Apptio Quickstart", "Apptio", "SaaS", None),
        ]
    }

    fn offering_names<'a>(offerings: &[&'a OfferingRecord]) -> Vec<&'a str> {
        offerings.iter().map(|o| o.offering_name.as_str()).collect()
    }

    #[test]
    fn default_filter_sorts_by_name_ignoring_case() {
        let catalog = catalog();
        let found = filter_offerings(&catalog, &OfferingFilter::default());
        assert_eq!(
            offering_names(&found),
            vec!["Apptio Quickstart", "envizi Onboarding", "Maximo Upgrade"]
        );
    }

    #[test]
    fn query_searches_name_summary_and_tag_line() {
        let catalog = catalog();
        let by = |query: &str| {
            let filter = OfferingFilter {
                query: query.to_string(),
                ..OfferingFilter::default()
            };
            offering_names(&filter_offerings(&catalog, &filter))
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>()
        };

        assert_eq!(by("QUICKSTART"), vec!["Apptio Quickstart"]);
        assert_eq!(by("mas release"), vec!["Maximo Upgrade"]);
        assert_eq!(by("sustainability"), vec!["envizi Onboarding"]);
        assert!(by("nothing like this").is_empty());
    }

    #[test]
    fn facets_combine_with_and_within_with_or() {
        let catalog = catalog();
        let filter = OfferingFilter {
            brands: vec!["Envizi".to_string(), "Apptio".to_string()],
            saas_types: vec!["SaaS".to_string()],
            ..OfferingFilter::default()
        };
        assert_eq!(
            offering_names(&filter_offerings(&catalog, &filter)),
            vec!["Apptio Quickstart", "envizi Onboarding"]
        );

        let filter = OfferingFilter {
            brands: vec!["Envizi".to_string()],
            saas_types: vec!["On-prem".to_string()],
            ..OfferingFilter::default()
        };
        assert!(filter_offerings(&catalog, &filter).is_empty());
    }

    #[test]
    fn product_filter_matches_product_id() {
        let catalog = catalog();
        let filter = OfferingFilter {
            products: vec![Uuid::from_u128(7)],
            ..OfferingFilter::default()
        };
        assert_eq!(offering_names(&filter_offerings(&catalog, &filter)), vec!["Maximo Upgrade"]);
    }

    #[test]
    fn duration_sort_is_textual_with_missing_first() {
        let catalog = catalog();
        let filter = OfferingFilter {
            sort: OfferingSort::Duration,
            ..OfferingFilter::default()
        };
        assert_eq!(
            offering_names(&filter_offerings(&catalog, &filter)),
            vec!["Apptio Quickstart", "Maximo Upgrade", "envizi Onboarding"]
        );
    }

    #[test]
    fn pages_hold_six_offerings() {
        let many: Vec<OfferingRecord> = (0..8)
            .map(|i| offering(&format!("Offering {}", i), "Maximo", "SaaS", None))
            .collect();
        let found: Vec<OfferingRecord> = filter_offerings(&many, &OfferingFilter::default())
            .into_iter()
            .cloned()
            .collect();

        let second = paginate(&found, 2, OFFERING_PAGE_SIZE);
        assert_eq!(second.items.len(), 2);
        assert_eq!(second.total_pages, 2);
    }
}

mod offering_detail {
    use super::*;

    fn sized(name: &str, category: Option<&str>, effort: Option<u32>, fixed: Option<f64>) -> ActivityRecord {
        ActivityRecord {
            effort_hours: effort,
            fixed_price: fixed,
            ..record(name, category)
        }
    }

    #[test]
    fn rolls_up_effort_and_price_by_block() {
        let records = vec![
            sized("Kickoff", Some("Plan"), Some(10), None),
            sized("Build", Some("Execute"), Some(100), Some(50000.0)),
            sized("Assess", Some("Plan"), None, None),
            sized("Wrap-up", Some(""), Some(5), None),
        ];

        let summary = summarize_offering(&records, &FlatRate::offering_detail());

        let prices: Vec<f64> = summary.activities.iter().map(|a| a.price).collect();
        assert_eq!(prices, vec![4300.0, 50000.0, 17200.0, 2150.0]);
        assert_eq!(summary.total_effort, 155);
        assert_eq!(summary.total_price, 73650.0);

        let blocks: Vec<&str> = summary.blocks.iter().map(|b| b.block.as_str()).collect();
        assert_eq!(blocks, vec!["Plan", "Execute", DEFAULT_BLOCK]);
        assert_eq!(summary.blocks[0].activities, vec![1, 3]);
        assert_eq!(summary.blocks[0].effort, 50);
        assert_eq!(summary.blocks[0].price, 21500.0);
    }

    #[test]
    fn empty_offering_has_zero_totals() {
        let summary = summarize_offering(&[], &FlatRate::offering_detail());
        assert!(summary.blocks.is_empty());
        assert_eq!(summary.total_effort, 0);
        assert_eq!(summary.total_price, 0.0);
    }
}

mod catalog_client {
    use super::*;

    async fn spawn_catalog(offering_id: Uuid, activity_id: Uuid) -> String {
        let app = Router::new()
            .route(
                "/activities",
                get(move || async move {
                    Json(vec![ActivityRecord {
                        activity_id,
                        activity_name: "Design Review".to_string(),
                        ..ActivityRecord::default()
                    }])
                }),
            )
            .route(
                "/offerings",
                get(move || async move {
                    Json(vec![OfferingRecord {
                        offering_id,
                        offering_name: "Maximo Upgrade".to_string(),
                        ..OfferingRecord::default()
                    }])
                }),
            )
            .route(
                "/staffing/offering/{id}",
                get(move |Path(id): Path<Uuid>| async move {
                    if id != offering_id {
                        return Err(StatusCode::NOT_FOUND);
                    }
                    Ok(Json(vec![StaffingRecord {
                        staffing_id: None,
                        activity_id,
                        country: "India-GDC".to_string(),
                        role: "Architect".to_string(),
                        band: 9,
                        hours: Some(16),
                    }]))
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("No local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn fetches_activities_and_staffing() {
        let offering_id = Uuid::new_v4();
        let activity_id = Uuid::new_v4();
        let base = spawn_catalog(offering_id, activity_id).await;
        let client = CatalogClient::new(base, None);

        let data = client
            .get_offering_data(offering_id)
            .await
            .expect("Fetch failed");

        assert_eq!(data.activities.len(), 1);
        assert_eq!(data.staffing.len(), 1);
        assert_eq!(data.staffing[0].activity_id, activity_id);
    }

    #[tokio::test]
    async fn fetches_offerings() {
        let offering_id = Uuid::new_v4();
        let base = spawn_catalog(offering_id, Uuid::new_v4()).await;
        let client = CatalogClient::new(base, None);

        let offerings = client.get_offerings().await.expect("Fetch failed");
        assert_eq!(offerings.len(), 1);
        assert_eq!(offerings[0].offering_id, offering_id);
    }

    #[tokio::test]
    async fn unknown_offering_is_not_found() {
        let base = spawn_catalog(Uuid::new_v4(), Uuid::new_v4()).await;
        let client = CatalogClient::new(base, None);

        let err = client.get_staffing(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = CatalogClient::new("http://catalog/api/v1/", None);
        assert_eq!(client.base_url(), "http://catalog/api/v1");
    }
}
