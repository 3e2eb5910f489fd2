//! Scenario seed configuration.
//!
//! Process-wide, read-only. Seed order matters: it breaks score ties during
//! ranking, so keep the broadest terms first when editing.

/// Seed terms per scenario, ten each.
pub const SCENARIO_SEEDS: &[(&str, &[&str])] = &[
    (
        "旅遊",
        &[
            "旅遊",
            "機票",
            "訂房",
            "背包客",
            "出國",
            "國內旅遊",
            "民宿",
            "旅行社",
            "自由行",
            "旅遊景點",
        ],
    ),
    (
        "健康",
        &[
            "健康",
            "養生",
            "運動",
            "睡眠",
            "心理健康",
            "飲食",
            "減重",
            "體重管理",
            "免疫力",
            "健檢",
        ],
    ),
    (
        "牙科",
        &[
            "牙科",
            "牙醫",
            "矯正",
            "植牙",
            "洗牙",
            "牙周病",
            "蛀牙",
            "假牙",
            "牙齒美白",
            "隱適美",
        ],
    ),
    (
        "保健品",
        &[
            "保健品",
            "維他命",
            "益生菌",
            "膠原蛋白",
            "魚油",
            "葉黃素",
            "鈣片",
            "保健食品",
            "營養補充",
            "抗氧化",
        ],
    ),
];

/// Seed list for a scenario, or `None` for an unknown scenario name.
pub fn seeds_for(scenario: &str) -> Option<&'static [&'static str]> {
    SCENARIO_SEEDS
        .iter()
        .find(|(name, _)| *name == scenario)
        .map(|(_, seeds)| *seeds)
}

/// All configured scenario names, in declaration order.
pub fn scenario_names() -> Vec<String> {
    SCENARIO_SEEDS
        .iter()
        .map(|(name, _)| (*name).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scenario_has_ten_seeds() {
        for (name, seeds) in SCENARIO_SEEDS {
            assert_eq!(seeds.len(), 10, "scenario {name}");
        }
    }

    #[test]
    fn seeds_for_known_and_unknown() {
        assert_eq!(seeds_for("旅遊").unwrap()[0], "旅遊");
        assert!(seeds_for("sports").is_none());
    }

    #[test]
    fn scenario_names_in_order() {
        assert_eq!(scenario_names(), vec!["旅遊", "健康", "牙科", "保健品"]);
    }
}
