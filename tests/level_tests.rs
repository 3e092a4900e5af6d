//! Level file parsing, configuration and campaign integration tests.

use rule_grid::core::{Action, EngineConfig};
use rule_grid::game::{Campaign, CampaignStep, Game, TurnResult};
use rule_grid::level::{parse_levels, Blueprint, BlueprintTable, LevelData, LevelError};

const LEVEL_FILE: &str = "\
Level 1 - Walk to the flag
7 x 5
hhhhhhh
h     h
h b f h
h     h
hhhhhhh

 BIY

 FIX


Level 2 - Push it
8 x 5
hhhhhhhh
hbr  f h
h      h
h      h
hhhhhhhh


 BIY
 FIX
 RIP
";

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_parse_level_file() {
    let levels = parse_levels(LEVEL_FILE).unwrap();

    assert_eq!(levels.len(), 2);
    assert_eq!(levels[0].name, "Level 1 - Walk to the flag");
    assert_eq!((levels[0].width, levels[0].height), (7, 5));
    assert_eq!(levels[1].name, "Level 2 - Push it");
    assert_eq!((levels[1].width, levels[1].height), (8, 5));
    for level in &levels {
        assert!(level.validate().is_ok());
    }
}

#[test]
fn test_text_round_trip() {
    let levels = parse_levels(LEVEL_FILE).unwrap();
    let text: String = levels.iter().map(LevelData::to_text).collect();

    assert_eq!(parse_levels(&text).unwrap(), levels);
}

#[test]
fn test_truncated_file_is_an_error() {
    let cut = &LEVEL_FILE[..LEVEL_FILE.find(" FIX").unwrap()];
    let err = parse_levels(cut).unwrap_err();
    assert!(matches!(err, LevelError::IncompleteLayer { .. }));
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_level_one_is_winnable() {
    let levels = parse_levels(LEVEL_FILE).unwrap();
    let mut game = Game::default();
    game.load_level(&levels[0]).unwrap();

    assert_eq!(game.apply_action(Action::MoveRight), TurnResult::Moved);
    assert_eq!(game.apply_action(Action::MoveRight), TurnResult::Win);
}

#[test]
fn test_custom_blueprint() {
    let mut blueprints = BlueprintTable::standard();
    blueprints.insert('k', Blueprint::thing("Key", "key.png"));
    blueprints.insert('E', Blueprint::word("Key", "word-key.png"));
    let config = EngineConfig::default().with_blueprints(blueprints);

    let level = LevelData::from_rows("keys", 3, 2, &["bk "], &["", "EIX"]);
    let mut game = Game::new(config);
    game.load_level(&level).unwrap();

    assert!(game.active_rules().contains_key("Key"));
    assert_eq!(game.win_entities().len(), 1);
}

// =============================================================================
// Campaign
// =============================================================================

#[test]
fn test_campaign_plays_through() {
    let mut campaign = Campaign::from_text(EngineConfig::default(), LEVEL_FILE).unwrap();

    campaign.apply_action(Action::MoveRight).unwrap();
    assert_eq!(
        campaign.apply_action(Action::MoveRight).unwrap(),
        CampaignStep::Advanced { index: 1 }
    );

    // Push the rock along the corridor to reach the flag.
    let mut last = None;
    for _ in 0..4 {
        last = Some(campaign.apply_action(Action::MoveRight).unwrap());
    }
    assert_eq!(last, Some(CampaignStep::Completed));
    assert!(campaign.is_completed());
}

#[test]
fn test_campaign_from_bad_text() {
    assert!(matches!(
        Campaign::from_text(EngineConfig::default(), ""),
        Err(LevelError::NoLevels)
    ));
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn test_config_json_round_trip() {
    let config = EngineConfig::default()
        .with_hard_blocker("Flag")
        .with_history_limit(64);

    let json = serde_json::to_string(&config).unwrap();
    let back: EngineConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(back, config);
}

#[test]
fn test_level_json_round_trip() {
    let level = parse_levels(LEVEL_FILE).unwrap().remove(1);

    let json = serde_json::to_string(&level).unwrap();
    let back: LevelData = serde_json::from_str(&json).unwrap();

    assert_eq!(back, level);
}
