use harvest_core::{PlanningGoal, ResourceKind, UnitKind, WorldSnapshot};

#[test]
fn snapshot_reads_engine_json() {
    let json = r#"{
        "width": 32,
        "height": 32,
        "units": [
            { "kind": "townhall", "x": 10, "y": 10 },
            { "kind": "peasant", "x": 11, "y": 11, "cargo": "gold" }
        ],
        "resources": [{ "kind": "wood", "x": 4, "y": 20, "amount": 400 }],
        "current_wood": 150
    }"#;

    let snapshot: WorldSnapshot = serde_json::from_str(json).expect("valid json");
    assert_eq!(snapshot.player, 0);
    assert_eq!(snapshot.units[0].kind, UnitKind::Townhall);
    assert_eq!(snapshot.units[1].cargo, Some(ResourceKind::Gold));
    assert_eq!(snapshot.resources[0].kind, ResourceKind::Wood);
    assert_eq!(snapshot.current_gold, 0);
    assert_eq!(snapshot.current_wood, 150);

    let goal: PlanningGoal =
        serde_json::from_str(r#"{ "required_wood": 500, "build_peasants": true }"#)
            .expect("valid json");
    assert_eq!(goal, PlanningGoal::new(0, 500).with_build_peasants(true));
}
