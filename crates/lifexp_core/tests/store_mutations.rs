use chrono::NaiveDate;
use lifexp_core::{
    CapsuleEntryType, CategoryId, MemorySnapshotRepository, NewBonusQuest, NewCapsuleEntry,
    ReviewKey, ReviewUpdate, XpStore,
};

fn empty_store() -> XpStore<MemorySnapshotRepository> {
    XpStore::open_for_year(MemorySnapshotRepository::new(), 2026)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn upsert_clamps_score_and_preserves_it_on_text_update() {
    let mut store = empty_store();

    let review = store.upsert_monthly_review(2026, 3, CategoryId::Career, &ReviewUpdate::score(5));
    assert_eq!(review.xp_score, 3);

    let review = store.upsert_monthly_review(
        2026,
        3,
        CategoryId::Career,
        &ReviewUpdate::what_i_did("shipped a project"),
    );
    assert_eq!(review.xp_score, 3);
    assert_eq!(review.what_i_did, "shipped a project");
    assert_eq!(store.monthly_reviews().len(), 1);
}

#[test]
fn upsert_keeps_one_record_per_key_and_merges_fields() {
    let mut store = empty_store();
    let first_id = store
        .upsert_monthly_review(
            2026,
            6,
            CategoryId::Health,
            &ReviewUpdate {
                xp_score: Some(2),
                what_improved: Some("sleep".to_string()),
                ..ReviewUpdate::default()
            },
        )
        .id
        .clone();

    store.upsert_monthly_review(
        2026,
        6,
        CategoryId::Health,
        &ReviewUpdate {
            what_improved: Some("running".to_string()),
            next_month_intent: Some("swim".to_string()),
            ..ReviewUpdate::default()
        },
    );

    assert_eq!(store.monthly_reviews().len(), 1);
    let review = store
        .review_for(ReviewKey {
            year: 2026,
            month: 6,
            category_id: CategoryId::Health,
        })
        .unwrap();
    assert_eq!(review.id, first_id);
    assert_eq!(review.xp_score, 2);
    assert_eq!(review.what_improved, "running");
    assert_eq!(review.next_month_intent, "swim");
    assert!(review.what_frustrated.is_empty());
}

#[test]
fn new_review_without_score_starts_at_zero() {
    let mut store = empty_store();
    let review = store.upsert_monthly_review(
        2026,
        1,
        CategoryId::Wealth,
        &ReviewUpdate::what_i_did("budget"),
    );
    assert_eq!(review.xp_score, 0);
}

#[test]
fn distinct_keys_create_distinct_records() {
    let mut store = empty_store();
    store.upsert_monthly_review(2026, 1, CategoryId::Wealth, &ReviewUpdate::score(1));
    store.upsert_monthly_review(2026, 2, CategoryId::Wealth, &ReviewUpdate::score(1));
    store.upsert_monthly_review(2025, 1, CategoryId::Wealth, &ReviewUpdate::score(1));
    store.upsert_monthly_review(2026, 1, CategoryId::Health, &ReviewUpdate::score(1));
    assert_eq!(store.monthly_reviews().len(), 4);
}

#[test]
fn delete_monthly_review_removes_by_id_and_ignores_unknown() {
    let mut store = empty_store();
    let id = store
        .upsert_monthly_review(2026, 1, CategoryId::Career, &ReviewUpdate::score(2))
        .id
        .clone();

    assert!(!store.delete_monthly_review("missing"));
    assert_eq!(store.monthly_reviews().len(), 1);
    assert!(store.delete_monthly_review(&id));
    assert!(store.monthly_reviews().is_empty());
}

#[test]
fn set_category_goal_upserts_and_keeps_id() {
    let mut store = empty_store();
    let seeded_id = store.goal_for(2026, CategoryId::Career).unwrap().id.clone();

    let goal = store.set_category_goal(2026, CategoryId::Career, "lead a team");
    assert_eq!(goal.id, seeded_id);
    assert_eq!(goal.goal_text, "lead a team");

    let goal = store.set_category_goal(2026, CategoryId::Career, "ship v2");
    assert_eq!(goal.goal_text, "ship v2");
    assert_eq!(store.category_goals().len(), 6);

    let next_year = store
        .set_category_goal(2027, CategoryId::Career, "mentor")
        .id
        .clone();
    assert_ne!(next_year, seeded_id);
    assert_eq!(store.category_goals().len(), 7);
    assert_eq!(
        store.goal_for(2026, CategoryId::Career).unwrap().goal_text,
        "ship v2"
    );
}

#[test]
fn add_bonus_quest_clamps_award_and_prepends() {
    let mut store = empty_store();
    let first = store.add_bonus_quest(NewBonusQuest::new(date(2026, 1, 5), "Read a book", 0));
    let second = store.add_bonus_quest(
        NewBonusQuest::new(date(2026, 1, 10), "Helped a friend", 10)
            .with_category(CategoryId::Relationships),
    );

    let quests = store.bonus_quests();
    assert_eq!(quests.len(), 2);
    assert_eq!(quests[0].id, second);
    assert_eq!(quests[0].xp_award, 3);
    assert_eq!(quests[0].category_id, Some(CategoryId::Relationships));
    assert_eq!(quests[1].id, first);
    assert_eq!(quests[1].xp_award, 1);
    assert_ne!(first, second);
}

#[test]
fn add_then_delete_bonus_quest_restores_collection() {
    let mut store = empty_store();
    store.add_bonus_quest(NewBonusQuest::new(date(2026, 2, 1), "Run 5k", 2));
    let before = store.bonus_quests().to_vec();

    let id = store.add_bonus_quest(NewBonusQuest::new(date(2026, 2, 2), "Run 10k", 3));
    assert!(store.delete_bonus_quest(&id));

    assert_eq!(store.bonus_quests(), before.as_slice());
    assert!(!store.delete_bonus_quest(&id));
}

#[test]
fn capsule_entries_prepend_and_delete_by_id() {
    let mut store = empty_store();
    let older = store.add_capsule_entry(NewCapsuleEntry::new(
        date(2026, 3, 1),
        CapsuleEntryType::Memory,
        "First hike of spring",
    ));
    let mut entry = NewCapsuleEntry::new(date(2026, 3, 2), CapsuleEntryType::Quote, "Keep going")
        .with_tags(vec!["motto".to_string(), "daily".to_string()]);
    entry.year = 2027;
    let newer = store.add_capsule_entry(entry);

    let entries = store.capsule_entries();
    assert_eq!(entries[0].id, newer);
    assert_eq!(entries[0].year, 2027);
    assert_eq!(entries[0].tags, vec!["motto", "daily"]);
    assert_eq!(entries[1].id, older);
    assert_eq!(entries[1].year, 2026);

    assert!(store.delete_capsule_entry(&older));
    assert!(!store.delete_capsule_entry(&older));
    assert_eq!(store.capsule_entries().len(), 1);
}
