//! Postgres adapter behaviour. Needs `DATABASE_URL` pointing at a server
//! where the test user may create databases:
//!
//! `cargo test -p marquee-core --test database_postgres_behaviour -- --ignored`
#![cfg(feature = "postgres")]

mod support;

use std::sync::Arc;

use marquee_core::database::PostgresDatabase;
use marquee_core::database::ports::{TitleRepository, UserOverlayRepository};
use marquee_core::query::{Clause, Predicate, TagField, TitleSortField, sorting::compile};
use marquee_core::{EngineConfig, QuerySpec, TitleQueryBuilder, TitleQueryEngine};
use marquee_model::{OverlayList, TitleID, UserID};
use sqlx::PgPool;
use support::{by_name, catalog, viewer};

async fn seeded(pool: PgPool) -> PostgresDatabase {
    let db = PostgresDatabase::from_pool(pool, 4);
    let titles = db.titles();
    for title in catalog() {
        titles.upsert(&title).await.unwrap();
    }
    db
}

#[sqlx::test(migrator = "marquee_core::MIGRATOR")]
#[ignore = "requires DATABASE_URL"]
async fn count_and_find_follow_the_predicate(pool: PgPool) {
    let db = seeded(pool).await;
    let titles = db.titles();

    let predicate = Predicate::all()
        .and(Clause::tags(TagField::Countries, ["in"]))
        .and(Clause::text("a"));
    let ordering = compile::<TitleSortField>(Some("title.asc")).unwrap();

    let total = titles.count(&predicate).await.unwrap();
    let found = titles.find(&predicate, &ordering, 0, 10).await.unwrap();
    let names: Vec<&str> = found.iter().map(|t| t.title.as_str()).collect();

    assert_eq!(total, 5);
    assert_eq!(
        names,
        vec!["Drishyam", "Kaithi", "Kota Factory", "Lagaan", "Panchayat"]
    );
}

#[sqlx::test(migrator = "marquee_core::MIGRATOR")]
#[ignore = "requires DATABASE_URL"]
async fn like_metacharacters_are_literal(pool: PgPool) {
    let db = seeded(pool).await;
    let predicate = Predicate::all().and(Clause::text("%"));
    assert_eq!(db.titles().count(&predicate).await.unwrap(), 1);
    let predicate = Predicate::all().and(Clause::text("_"));
    assert_eq!(db.titles().count(&predicate).await.unwrap(), 0);
}

#[sqlx::test(migrator = "marquee_core::MIGRATOR")]
#[ignore = "requires DATABASE_URL"]
async fn get_round_trips_a_title(pool: PgPool) {
    let db = seeded(pool).await;
    let fixtures = catalog();
    let dark = by_name(&fixtures, "Dark");

    let loaded = db.titles().get(dark.id).await.unwrap().unwrap();
    assert_eq!(loaded.title, "Dark");
    assert_eq!(loaded.genres, dark.genres);
    assert_eq!(loaded.age_rating, 16);
    assert!(db.titles().get(TitleID::new()).await.unwrap().is_none());
}

#[sqlx::test(migrator = "marquee_core::MIGRATOR")]
#[ignore = "requires DATABASE_URL"]
async fn overlay_record_lifecycle(pool: PgPool) {
    let db = PostgresDatabase::from_pool(pool, 4);
    let overlays = db.user_overlays();
    let user = UserID::new();
    let title = TitleID::new();

    assert!(overlays.get_by_user_id(user).await.unwrap().is_none());

    overlays.ensure(user).await.unwrap();
    overlays.ensure(user).await.unwrap();
    let sets = overlays.get_by_user_id(user).await.unwrap().unwrap();
    assert!(sets.seen.is_empty() && sets.starred.is_empty());

    overlays.add(user, OverlayList::Seen, title).await.unwrap();
    overlays.add(user, OverlayList::Unseen, title).await.unwrap();
    overlays.add(user, OverlayList::Seen, title).await.unwrap();
    let sets = overlays.get_by_user_id(user).await.unwrap().unwrap();
    assert!(sets.seen.contains(&title) && sets.unseen.contains(&title));

    overlays.remove(user, OverlayList::Seen, title).await.unwrap();
    let sets = overlays.get_by_user_id(user).await.unwrap().unwrap();
    assert!(!sets.seen.contains(&title) && sets.unseen.contains(&title));
}

#[sqlx::test(migrator = "marquee_core::MIGRATOR")]
#[ignore = "requires DATABASE_URL"]
async fn engine_pages_over_postgres(pool: PgPool) {
    let db = seeded(pool).await;
    let engine = TitleQueryEngine::new(
        Arc::new(db.titles()),
        Arc::new(db.user_overlays()),
        EngineConfig::default(),
    );
    let viewer = viewer();

    let page = engine.find_all(&QuerySpec::default(), &viewer).await.unwrap();
    assert_eq!((page.total_results, page.total_pages), (12, 3));
    assert_eq!(page.results[0].title.title, "100% Love");

    let spec = TitleQueryBuilder::new().age_between(12, 18).limit(100).build();
    let page = engine.find_all(&spec, &viewer).await.unwrap();
    assert_eq!(page.total_results, 9);

    let beyond = TitleQueryBuilder::new().page(4).build();
    let page = engine.find_all(&beyond, &viewer).await.unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total_results, 12);
}
