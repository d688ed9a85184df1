mod common;

use common::{listing, InMemoryStore};
use nestboard::dtos::propertydtos::SearchQueryDto;
use nestboard::models::agencymodel::AgencyStatus;
use nestboard::service::search_service::{execute_search, SearchCriteria, SortOrder};
use uuid::Uuid;

fn query() -> SearchQueryDto {
    SearchQueryDto::default()
}

#[tokio::test]
async fn price_band_returns_only_published_listings_inside_it() {
    let mut in_band = listing(1, "London semi", 300_000);
    in_band.city = "London".to_string();
    let mut too_dear = listing(2, "Bristol detached", 600_000);
    too_dear.city = "Bristol".to_string();
    too_dear.bedrooms = 4;
    let mut draft = listing(3, "Unlisted semi", 300_000);
    draft.is_published = false;

    let store = InMemoryStore::new(vec![in_band, too_dear, draft]);

    let mut q = query();
    q.min_price = Some("250000".to_string());
    q.max_price = Some("400000".to_string());
    let criteria = SearchCriteria::from_query(q).unwrap();

    let response = execute_search(&store, &criteria).await.unwrap();

    assert_eq!(response.pagination.total, 1);
    assert_eq!(response.data.len(), 1);
    assert_eq!(response.data[0].title, "London semi");
    assert_eq!(response.map_data.len(), 1);
}

#[tokio::test]
async fn second_page_of_three_reports_exact_pagination() {
    let store = InMemoryStore::new(vec![
        listing(1, "First", 100_000),
        listing(2, "Second", 200_000),
        listing(3, "Third", 300_000),
    ]);

    let mut q = query();
    q.page = Some("2".to_string());
    q.limit = Some("1".to_string());
    q.sort_by = Some("price".to_string());
    q.sort_order = Some("asc".to_string());
    let criteria = SearchCriteria::from_query(q).unwrap();

    let response = execute_search(&store, &criteria).await.unwrap();

    assert_eq!(response.data.len(), 1);
    assert_eq!(response.data[0].title, "Second");
    assert_eq!(response.pagination.page, 2);
    assert_eq!(response.pagination.limit, 1);
    assert_eq!(response.pagination.total, 3);
    assert_eq!(response.pagination.total_pages, 3);
    assert!(response.pagination.has_more);
}

#[tokio::test]
async fn map_data_covers_the_full_match_set_while_data_is_windowed() {
    let store = InMemoryStore::new(vec![
        listing(1, "First", 100_000),
        listing(2, "Second", 200_000),
        listing(3, "Third", 300_000),
        listing(4, "Fourth", 400_000),
    ]);

    let mut q = query();
    q.limit = Some("2".to_string());
    let criteria = SearchCriteria::from_query(q).unwrap();

    let response = execute_search(&store, &criteria).await.unwrap();

    assert_eq!(response.data.len(), 2);
    assert_eq!(response.map_data.len(), 4);
    assert_eq!(response.pagination.total, 4);
}

#[tokio::test]
async fn repeated_searches_over_an_unchanged_store_are_identical() {
    let store = InMemoryStore::new(vec![
        listing(1, "First", 100_000),
        listing(2, "Second", 100_000),
        listing(3, "Third", 300_000),
    ]);

    let mut q = query();
    q.sort_by = Some("price".to_string());
    let criteria = SearchCriteria::from_query(q).unwrap();

    let first = execute_search(&store, &criteria).await.unwrap();
    let second = execute_search(&store, &criteria).await.unwrap();

    let first_json = serde_json::to_value(&first).unwrap();
    let second_json = serde_json::to_value(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[tokio::test]
async fn equal_sort_keys_break_ties_by_id_ascending_in_both_orders() {
    let store = InMemoryStore::new(vec![
        listing(7, "Late id", 200_000),
        listing(2, "Early id", 200_000),
        listing(5, "Middle id", 200_000),
    ]);

    for order in ["asc", "desc"] {
        let mut q = query();
        q.sort_by = Some("price".to_string());
        q.sort_order = Some(order.to_string());
        let criteria = SearchCriteria::from_query(q).unwrap();
        assert_eq!(
            criteria.sort_order,
            if order == "asc" {
                SortOrder::Asc
            } else {
                SortOrder::Desc
            }
        );

        let response = execute_search(&store, &criteria).await.unwrap();
        let ids: Vec<Uuid> = response.data.iter().map(|l| l.id).collect();
        assert_eq!(
            ids,
            vec![Uuid::from_u128(2), Uuid::from_u128(5), Uuid::from_u128(7)]
        );
    }
}

#[tokio::test]
async fn page_never_exceeds_the_requested_limit() {
    let properties: Vec<_> = (1..=30)
        .map(|seq| listing(seq, "Listing", 100_000 + seq as i64))
        .collect();
    let store = InMemoryStore::new(properties);

    let mut q = query();
    q.limit = Some("7".to_string());
    let criteria = SearchCriteria::from_query(q).unwrap();

    let response = execute_search(&store, &criteria).await.unwrap();
    assert_eq!(response.data.len(), 7);
    assert_eq!(response.pagination.total, 30);
    assert_eq!(response.pagination.total_pages, 5);
}

#[tokio::test]
async fn page_beyond_the_match_set_is_empty_with_correct_metadata() {
    let store = InMemoryStore::new(vec![listing(1, "Only one", 100_000)]);

    let mut q = query();
    q.page = Some("3".to_string());
    let criteria = SearchCriteria::from_query(q).unwrap();

    let response = execute_search(&store, &criteria).await.unwrap();
    assert!(response.data.is_empty());
    assert_eq!(response.pagination.total, 1);
    assert!(!response.pagination.has_more);
}

#[tokio::test]
async fn suspended_agency_slug_yields_an_empty_result_not_an_error() {
    let mut suspended = listing(1, "Hidden listing", 100_000);
    suspended.agency_slug = "dormant-homes".to_string();
    suspended.agency_status = AgencyStatus::Suspended;
    let store = InMemoryStore::new(vec![suspended, listing(2, "Visible listing", 200_000)]);

    let mut q = query();
    q.agency_slug = Some("dormant-homes".to_string());
    let criteria = SearchCriteria::from_query(q).unwrap();

    let response = execute_search(&store, &criteria).await.unwrap();
    assert!(response.data.is_empty());
    assert!(response.map_data.is_empty());
    assert_eq!(response.pagination.total, 0);
    assert_eq!(response.pagination.total_pages, 0);
    assert!(!response.pagination.has_more);
}

#[tokio::test]
async fn unpublished_listings_never_appear_in_any_projection() {
    let mut draft = listing(1, "Draft listing", 100_000);
    draft.is_published = false;
    let store = InMemoryStore::new(vec![draft, listing(2, "Live listing", 200_000)]);

    let criteria = SearchCriteria::from_query(query()).unwrap();
    let response = execute_search(&store, &criteria).await.unwrap();

    assert_eq!(response.pagination.total, 1);
    assert_eq!(response.data[0].title, "Live listing");
    assert_eq!(response.map_data.len(), 1);
}
