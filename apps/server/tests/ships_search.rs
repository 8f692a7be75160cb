#![allow(unused)]
//! Integration tests for filtered listing, counting, paging and ordering

mod support;

use axum::http::{Method, StatusCode};
use serde_json::Value;
use support::*;

fn ids(ships: &Value) -> Vec<i64> {
    ships
        .as_array()
        .map(|ships| ships.iter().filter_map(|s| s["id"].as_i64()).collect())
        .unwrap_or_default()
}

// ============================================================================
// Paging and ordering
// ============================================================================

#[tokio::test]
async fn default_page_is_first_three_by_id() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_fleet(&app).await?;
            let ships = app.get_json("/rest/ships").await?;
            assert_eq!(ids(&ships), [1, 2, 3]);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn page_number_is_zero_based() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_fleet(&app).await?;
            let second = app.get_json("/rest/ships?pageNumber=1").await?;
            assert_eq!(ids(&second), [4, 5]);

            let beyond = app.get_json("/rest/ships?pageNumber=7").await?;
            assert_eq!(ids(&beyond), Vec::<i64>::new());

            let all = app.get_json("/rest/ships?pageSize=10").await?;
            assert_eq!(ids(&all), [1, 2, 3, 4, 5]);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn order_selects_sort_key() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_fleet(&app).await?;

            for (order, expected) in [
                ("ID", [1, 2, 3, 4, 5]),
                ("SPEED", [4, 1, 5, 2, 3]),
                ("DATE", [4, 1, 2, 3, 5]),
                ("RATING", [4, 1, 2, 3, 5]),
            ] {
                let ships = app
                    .get_json(&format!("/rest/ships?order={order}&pageSize=10"))
                    .await?;
                assert_eq!(ids(&ships), expected, "order={order}");
            }
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn equal_sort_keys_fall_back_to_id() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            for name in ["c", "a", "b"] {
                app.create_ship(&ShipBuilder::new().name(name).speed(0.3).build())
                    .await?;
            }
            let ships = app.get_json("/rest/ships?order=SPEED&pageSize=2").await?;
            assert_eq!(ids(&ships), [1, 2]);
            let ships = app
                .get_json("/rest/ships?order=SPEED&pageSize=2&pageNumber=1")
                .await?;
            assert_eq!(ids(&ships), [3]);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn configured_page_limits_apply() -> anyhow::Result<()> {
    with_test_app_with_config(
        |config| {
            config.ships.default_page_size = 2;
            config.ships.max_page_size = Some(4);
        },
        |app| {
            Box::pin(async move {
                seed_fleet(&app).await?;
                let ships = app.get_json("/rest/ships").await?;
                assert_eq!(ids(&ships), [1, 2]);

                let (status, _headers, _body) = app
                    .request(Method::GET, "/rest/ships?pageSize=5", None)
                    .await?;
                assert_status(status, StatusCode::BAD_REQUEST, "pageSize above max");
                Ok(())
            })
        },
    )
    .await
}

// ============================================================================
// Filters
// ============================================================================

#[tokio::test]
async fn text_filters_match_substrings() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_fleet(&app).await?;

            let ships = app.get_json("/rest/ships?name=Falcon&pageSize=10").await?;
            assert_eq!(ids(&ships), [1, 2]);

            let ships = app.get_json("/rest/ships?name=awk&pageSize=10").await?;
            assert_eq!(ids(&ships), [3]);

            let ships = app
                .get_json("/rest/ships?planet=Mars&shipType=TRANSPORT&pageSize=10")
                .await?;
            assert_eq!(ids(&ships), [5]);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn like_wildcards_are_matched_literally() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            app.create_ship(&ShipBuilder::new().name("100% Steel").build())
                .await?;
            app.create_ship(&ShipBuilder::new().name("Plain").build())
                .await?;

            let ships = app.get_json("/rest/ships?name=%25&pageSize=10").await?;
            assert_eq!(ids(&ships), [1]);

            let ships = app.get_json("/rest/ships?name=_&pageSize=10").await?;
            assert_eq!(ids(&ships), Vec::<i64>::new());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn flag_and_type_filters_use_equality() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_fleet(&app).await?;

            let ships = app.get_json("/rest/ships?isUsed=true&pageSize=10").await?;
            assert_eq!(ids(&ships), [2, 4]);

            let ships = app
                .get_json("/rest/ships?shipType=MILITARY&isUsed=false&pageSize=10")
                .await?;
            assert_eq!(ids(&ships), [3]);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn min_speed_alone_is_a_lower_bound() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_fleet(&app).await?;
            let ships = app.get_json("/rest/ships?minSpeed=0.5&pageSize=10").await?;
            assert_eq!(ids(&ships), [2, 3, 5]);
            for ship in ships.as_array().into_iter().flatten() {
                assert!(ship["speed"].as_f64().unwrap_or(0.0) >= 0.5);
            }
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn max_crew_size_alone_is_an_upper_bound() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_fleet(&app).await?;
            let ships = app
                .get_json("/rest/ships?maxCrewSize=50&pageSize=10")
                .await?;
            assert_eq!(ids(&ships), [1, 3, 5]);
            for ship in ships.as_array().into_iter().flatten() {
                assert!(ship["crewSize"].as_i64().unwrap_or(i64::MAX) <= 50);
            }
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn numeric_ranges_are_inclusive() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_fleet(&app).await?;

            let ships = app
                .get_json("/rest/ships?minRating=2&maxRating=7.2&pageSize=10")
                .await?;
            assert_eq!(ids(&ships), [2, 3]);

            let ships = app
                .get_json("/rest/ships?minCrewSize=12&maxCrewSize=400&pageSize=10")
                .await?;
            assert_eq!(ids(&ships), [1, 2, 3]);

            let ships = app
                .get_json("/rest/ships?minSpeed=0.25&maxSpeed=0.75&pageSize=10")
                .await?;
            assert_eq!(ids(&ships), [1, 2, 5]);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn date_bounds_widen_to_whole_years() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_fleet(&app).await?;

            // Late December still admits ships from earlier in that year.
            let after = millis_at(3005, 12, 20);
            let ships = app
                .get_json(&format!("/rest/ships?after={after}&pageSize=10"))
                .await?;
            assert_eq!(ids(&ships), [2, 3, 5]);

            // Early January still admits ships from later in that year.
            let before = millis_at(2990, 1, 5);
            let ships = app
                .get_json(&format!("/rest/ships?before={before}&pageSize=10"))
                .await?;
            assert_eq!(ids(&ships), [1, 4]);

            let after = millis_at(3010, 11, 1);
            let before = millis_at(3010, 2, 1);
            let ships = app
                .get_json(&format!(
                    "/rest/ships?after={after}&before={before}&pageSize=10"
                ))
                .await?;
            assert_eq!(ids(&ships), [3]);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn invalid_parameters_are_bad_requests() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            for query in [
                "pageNumber=-1",
                "pageSize=0",
                "minSpeed=fast",
                "shipType=CRUISER",
                "order=NAME",
                "isUsed=maybe",
                "maxCrewSize=1.5",
            ] {
                let uri = format!("/rest/ships?{query}");
                let (status, _headers, body) = app.request(Method::GET, &uri, None).await?;
                assert_status(status, StatusCode::BAD_REQUEST, &uri);
                let error: Value = serde_json::from_slice(&body)?;
                assert_eq!(error["code"], "VALIDATION_ERROR", "{uri}");
            }

            let (status, _headers, _body) = app
                .request(Method::GET, "/rest/ships/count?minRating=high", None)
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, "count with bad filter");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn non_finite_bounds_are_bad_requests() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_fleet(&app).await?;
            for query in [
                "maxSpeed=NaN",
                "minSpeed=NaN",
                "minRating=inf",
                "maxRating=-inf",
            ] {
                for path in ["/rest/ships", "/rest/ships/count"] {
                    let uri = format!("{path}?{query}");
                    let (status, _headers, body) = app.request(Method::GET, &uri, None).await?;
                    assert_status(status, StatusCode::BAD_REQUEST, &uri);
                    let error: Value = serde_json::from_slice(&body)?;
                    assert_eq!(error["code"], "VALIDATION_ERROR", "{uri}");
                }
            }
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn empty_parameter_values_are_ignored() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_fleet(&app).await?;
            let blanks = "minSpeed=&maxRating=&maxCrewSize=&isUsed=&after=&shipType=";

            let ships = app
                .get_json(&format!("/rest/ships?{blanks}&pageSize=10"))
                .await?;
            assert_eq!(ids(&ships), [1, 2, 3, 4, 5]);

            let ships = app
                .get_json(&format!("/rest/ships?{blanks}&pageSize="))
                .await?;
            assert_eq!(ids(&ships), [1, 2, 3]);

            let count = app.get_json(&format!("/rest/ships/count?{blanks}")).await?;
            assert_eq!(count, 5);

            let ships = app
                .get_json("/rest/ships?minSpeed=&maxSpeed=0.5&pageSize=10")
                .await?;
            assert_eq!(ids(&ships), [1, 4, 5]);
            Ok(())
        })
    })
    .await
}

// ============================================================================
// Count
// ============================================================================

#[tokio::test]
async fn count_ignores_paging() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_fleet(&app).await?;
            let count = app
                .get_json("/rest/ships/count?pageSize=1&pageNumber=3&order=RATING")
                .await?;
            assert_eq!(count, 5);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn count_matches_unpaged_list() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            seed_fleet(&app).await?;

            for filter in [
                "",
                "name=Falcon",
                "planet=Earth&isUsed=false",
                "minSpeed=0.3",
                "maxCrewSize=100&shipType=TRANSPORT",
                "minRating=0.5&maxRating=3",
                "after=0",
                "name=nothing-matches",
            ] {
                let listed = app
                    .get_json(&format!("/rest/ships?{filter}&pageSize=100"))
                    .await?;
                let count = app.get_json(&format!("/rest/ships/count?{filter}")).await?;
                assert_eq!(
                    Some(listed.as_array().map_or(0, Vec::len) as u64),
                    count.as_u64(),
                    "filter `{filter}`"
                );
            }
            Ok(())
        })
    })
    .await
}
