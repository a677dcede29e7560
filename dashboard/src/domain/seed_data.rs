//! Literal dataset the ledger starts from.
//!
//! Totals: priya 125, arjun 180, sara 95.

use shared::CoinCategory;

pub(crate) struct SeedGroup {
    pub child_id: &'static str,
    pub category: CoinCategory,
    pub count: u32,
    pub description: &'static str,
}

pub(crate) const SEED_GROUPS: &[SeedGroup] = &[
    SeedGroup {
        child_id: "priya",
        category: CoinCategory::ClassCompletion,
        count: 4,
        description: "Completed Maths live class",
    },
    SeedGroup {
        child_id: "priya",
        category: CoinCategory::HomeworkSubmission,
        count: 2,
        description: "Submitted fractions worksheet",
    },
    SeedGroup {
        child_id: "priya",
        category: CoinCategory::GameCompletion,
        count: 5,
        description: "Finished times-table challenge",
    },
    SeedGroup {
        child_id: "arjun",
        category: CoinCategory::ClassCompletion,
        count: 5,
        description: "Completed Science live class",
    },
    SeedGroup {
        child_id: "arjun",
        category: CoinCategory::HomeworkSubmission,
        count: 2,
        description: "Submitted reading log",
    },
    SeedGroup {
        child_id: "arjun",
        category: CoinCategory::GameCompletion,
        count: 8,
        description: "Finished spelling bee game",
    },
    SeedGroup {
        child_id: "sara",
        category: CoinCategory::ClassCompletion,
        count: 4,
        description: "Completed English live class",
    },
    SeedGroup {
        child_id: "sara",
        category: CoinCategory::HomeworkSubmission,
        count: 2,
        description: "Submitted story draft",
    },
    SeedGroup {
        child_id: "sara",
        category: CoinCategory::GameCompletion,
        count: 3,
        description: "Finished word puzzle",
    },
];

/// Seed entries in the order they are applied (oldest first)
pub(crate) fn seed_entries() -> Vec<(&'static str, CoinCategory, String)> {
    SEED_GROUPS
        .iter()
        .flat_map(|group| {
            (1..=group.count).map(move |n| {
                (
                    group.child_id,
                    group.category,
                    format!("{} ({}/{})", group.description, n, group.count),
                )
            })
        })
        .collect()
}
