use keeper_script::value::ValueOp;
use keeper_script::{ConditionId, EngineOptions, ScriptEngine, Severity, SimHost};
use keeper_types::MapLocation;

fn load(text: &str, host: &mut SimHost) -> ScriptEngine {
    let mut engine = ScriptEngine::default();
    engine.load_level(text, host);
    engine
}

fn run(engine: &mut ScriptEngine, host: &mut SimHost, turns: usize) {
    for _ in 0..turns {
        host.advance();
        engine.tick(host);
    }
}

fn messages(engine: &ScriptEngine, severity: Severity) -> Vec<(usize, &str)> {
    engine
        .diagnostics()
        .iter()
        .filter(|d| d.severity == severity)
        .map(|d| (d.line, d.message.as_str()))
        .collect()
}

#[test]
fn top_level_creatures_spawn_while_loading() {
    let mut host = SimHost::new();
    host.add_action_point(1, (12, 30));
    let engine = load(
        "LEVEL_VERSION(1)\nADD_CREATURE_TO_LEVEL(PLAYER_GOOD, HORNY, 1, 3, 1, 500)\n",
        &mut host,
    );
    assert_eq!(host.creatures.len(), 3);
    for creature in &host.creatures {
        assert_eq!(creature.kind, 14);
        assert_eq!(creature.level, 0);
        assert_eq!(creature.gold, 500);
        assert_eq!(creature.location, MapLocation::ActionPoint(1));
    }
    assert_eq!(host.dungeons[4].num_active_creatures, 3);
    assert!(engine.script().party_triggers.is_empty());
    assert_eq!(
        messages(&engine, Severity::Warning),
        [(0, "No WIN GAME conditions in script file.")]
    );
}

#[test]
fn commands_inside_if_wait_for_the_condition() {
    let mut host = SimHost::new();
    let mut engine = load(
        "IF(PLAYER0, MONEY >= 1000)\n    CREATURE_AVAILABLE(PLAYER0, HORNY, 1, 1)\nENDIF\n",
        &mut host,
    );
    assert_eq!(engine.script().values.len(), 1);
    assert!(host.creatures_available.is_empty());

    run(&mut engine, &mut host, 2);
    assert!(host.creatures_available.is_empty());

    host.dungeons[0].total_money_owned = 1000;
    run(&mut engine, &mut host, 1);
    assert_eq!(host.creatures_available.get(&(0, 14)), Some(&(1, 1)));
}

#[test]
fn reusable_commands_fire_every_turn() {
    let mut host = SimHost::new();
    let mut engine = load(
        "LEVEL_VERSION(1)\n\
         IF(PLAYER0, GAME_TURN > 0)\n\
         ADD_GOLD_TO_PLAYER(PLAYER0, 10)\n\
         NEXT_COMMAND_REUSABLE\n\
         ADD_GOLD_TO_PLAYER(PLAYER1, 5)\n\
         ADD_GOLD_TO_PLAYER(PLAYER2, 1)\n\
         ENDIF\n",
        &mut host,
    );
    run(&mut engine, &mut host, 3);
    assert_eq!(host.dungeons[0].total_money_owned, 10);
    assert_eq!(host.dungeons[1].total_money_owned, 15);
    assert_eq!(host.dungeons[2].total_money_owned, 1);
}

#[test]
fn random_is_rolled_once_while_loading() {
    let mut host = SimHost::new();
    let mut engine = load(
        "LEVEL_VERSION(1)\n\
         IF(PLAYER0, GAME_TURN >= 0)\n\
         NEXT_COMMAND_REUSABLE\n\
         ADD_GOLD_TO_PLAYER(PLAYER0, RANDOM(1, 100))\n\
         ENDIF\n",
        &mut host,
    );
    let amount = match engine.script().values[0].op {
        ValueOp::AddGold { amount, .. } => amount,
        ref other => panic!("unexpected value {other:?}"),
    };
    assert!((1..=100).contains(&amount));
    run(&mut engine, &mut host, 3);
    assert_eq!(host.dungeons[0].total_money_owned, 3 * amount);
}

#[test]
fn all_players_condition_is_met_by_any_keeper() {
    let mut host = SimHost::new();
    let mut engine = load("IF(ALL_PLAYERS, MONEY >= 500)\n  WIN_GAME\nENDIF\n", &mut host);
    run(&mut engine, &mut host, 1);
    assert!(host.won.is_empty());

    host.dungeons[2].total_money_owned = 600;
    run(&mut engine, &mut host, 1);
    assert_eq!(host.won, [0]);
}

#[test]
fn nested_conditions_record_their_parent() {
    let mut host = SimHost::new();
    let engine = load(
        "IF(PLAYER0, MONEY > 100)\n\
         IF(PLAYER1, MONEY > 100)\n\
         WIN_GAME\n\
         ENDIF\n\
         LOSE_GAME\n\
         ENDIF\n",
        &mut host,
    );
    let script = engine.script();
    assert_eq!(script.conditions.len(), 2);
    assert_eq!(script.conditions[0].parent, None);
    assert_eq!(script.conditions[1].parent, Some(ConditionId(0)));
    assert_eq!(script.win_conditions, [ConditionId(1)]);
    assert_eq!(script.lose_conditions, [ConditionId(0)]);
}

#[test]
fn block_errors() {
    let mut host = SimHost::new();
    let engine = load("ENDIF\nWIN_GAME\nIF(PLAYER0, MONEY > 1)\n", &mut host);
    assert_eq!(
        messages(&engine, Severity::Error),
        [
            (1, "Unexpected ENDIF"),
            (2, "Command WIN GAME found with no condition"),
        ]
    );
    assert!(
        messages(&engine, Severity::Warning).contains(&(0, "Missing ENDIF's in script file."))
    );
}

#[test]
fn failed_condition_drops_its_block() {
    let mut host = SimHost::new();
    let engine = load(
        "LEVEL_VERSION(1)\n\
         IF(PLAYER0, BANANAS > 1)\n\
         ADD_GOLD_TO_PLAYER(PLAYER0, 100)\n\
         IF(PLAYER0, MONEY > 1)\n\
         ENDIF\n\
         ENDIF\n\
         ADD_GOLD_TO_PLAYER(PLAYER0, 7)\n",
        &mut host,
    );
    assert!(engine.script().conditions.is_empty());
    assert!(engine.script().values.is_empty());
    assert_eq!(host.dungeons[0].total_money_owned, 7);
    assert_eq!(
        messages(&engine, Severity::Error),
        [(2, "Unknown variable name, 'BANANAS'")]
    );
}

#[test]
fn too_many_conditions_keeps_blocks_balanced() {
    let mut host = SimHost::new();
    let mut text = String::new();
    for _ in 0..50 {
        text.push_str("IF(PLAYER0, MONEY > 0)\n");
    }
    for _ in 0..50 {
        text.push_str("ENDIF\n");
    }
    let engine = load(&text, &mut host);
    assert_eq!(engine.script().conditions.len(), 48);
    let errors = messages(&engine, Severity::Error);
    assert_eq!(errors, [(49, "Too many conditions in script (limit is 48)")]);
    assert!(
        !messages(&engine, Severity::Warning)
            .iter()
            .any(|(_, m)| m.contains("ENDIF"))
    );
}

#[test]
fn level_version_selects_the_grammar_before_loading() {
    let mut host = SimHost::new();
    let engine = load("ADD_GOLD_TO_PLAYER(PLAYER0, 100)\nLEVEL_VERSION(1)\n", &mut host);
    assert_eq!(engine.level_version(), 1);
    assert_eq!(host.dungeons[0].total_money_owned, 100);

    let mut host = SimHost::new();
    let engine = load("ADD_GOLD_TO_PLAYER(PLAYER0, 100)\n", &mut host);
    assert_eq!(host.dungeons[0].total_money_owned, 0);
    assert_eq!(
        messages(&engine, Severity::Error),
        [(1, "Invalid command, 'ADD_GOLD_TO_PLAYER' (lev ver 0)")]
    );
}

#[test]
fn network_games_decide_elsewhere() {
    let mut host = SimHost::new();
    host.network_active = true;
    let mut engine = load("IF(PLAYER0, GAME_TURN > 0)\nWIN_GAME\nENDIF\n", &mut host);
    run(&mut engine, &mut host, 2);
    assert!(host.won.is_empty());
}

#[test]
fn victory_stops_the_script() {
    let text = "LEVEL_VERSION(1)\n\
                IF(PLAYER0, GAME_TURN > 1)\n\
                WIN_GAME\n\
                ENDIF\n\
                IF(PLAYER0, GAME_TURN > 0)\n\
                NEXT_COMMAND_REUSABLE\n\
                ADD_GOLD_TO_PLAYER(PLAYER1, 1)\n\
                ENDIF\n";

    let mut host = SimHost::new();
    let mut engine = load(text, &mut host);
    run(&mut engine, &mut host, 5);
    assert_eq!(host.won, [0]);
    assert_eq!(host.dungeons[1].total_money_owned, 2);

    let mut host = SimHost::new();
    let mut engine = ScriptEngine::new(EngineOptions {
        run_after_victory: true,
        ..EngineOptions::default()
    });
    engine.load_level(text, &mut host);
    run(&mut engine, &mut host, 5);
    assert_eq!(host.dungeons[1].total_money_owned, 5);
}

#[test]
fn block_comments_are_skipped() {
    let mut host = SimHost::new();
    let engine = load(
        "/* ADD_GOLD_TO_PLAYER(PLAYER0, 100)\n   still a comment */\nLEVEL_VERSION(1)\nBOGUS\n",
        &mut host,
    );
    assert_eq!(host.dungeons[0].total_money_owned, 0);
    assert_eq!(
        messages(&engine, Severity::Error),
        [(4, "Invalid command, 'BOGUS' (lev ver 1)")]
    );
}

#[test]
fn parties_attack_when_an_action_point_is_entered() {
    let mut host = SimHost::new();
    host.add_action_point(1, (5, 5));
    host.add_hero_gate(1, (60, 60));
    let mut engine = load(
        "LEVEL_VERSION(1)\n\
         CREATE_PARTY(RAIDERS)\n\
         ADD_TO_PARTY(RAIDERS, KNIGHT, 3, 100, ATTACK_DUNGEON_HEART, 0)\n\
         ADD_TO_PARTY(RAIDERS, THIEF, 1, 0, STEAL_GOLD, 200)\n\
         IF_ACTION_POINT(1, PLAYER0)\n\
         ADD_PARTY_TO_LEVEL(PLAYER_GOOD, RAIDERS, -1, 1)\n\
         ENDIF\n",
        &mut host,
    );
    run(&mut engine, &mut host, 1);
    assert!(host.creatures.is_empty());

    host.activate_action_point(1, 0);
    run(&mut engine, &mut host, 3);
    assert_eq!(host.creatures.len(), 2);
    assert!(host.creatures.iter().all(|c| c.player == 4));
    assert_eq!(host.creatures[0].level, 2);
    assert_eq!(
        host.group_leader(keeper_script::CreatureId(1)),
        Some(keeper_script::CreatureId(0))
    );
}

#[test]
fn huge_gold_amounts_saturate() {
    let mut host = SimHost::new();
    let mut engine = load(
        "LEVEL_VERSION(1)\n\
         START_MONEY(PLAYER0, 9223372036854775807)\n\
         ADD_GOLD_TO_PLAYER(PLAYER0, 9223372036854775807)\n\
         ADD_GOLD_TO_PLAYER(PLAYER0, 9223372036854775807)\n\
         IF(PLAYER0, GAME_TURN > 0)\n\
         NEXT_COMMAND_REUSABLE\n\
         ADD_GOLD_TO_PLAYER(PLAYER0, 9223372036854775807)\n\
         ENDIF\n",
        &mut host,
    );
    run(&mut engine, &mut host, 3);
    assert_eq!(host.dungeons[0].total_money_owned, i64::MAX);
    assert_eq!(host.dungeons[0].offmap_money_owned, i64::MAX);
    assert!(messages(&engine, Severity::Error).is_empty());
}

#[test]
fn reveals_at_the_edge_of_the_number_range() {
    let mut host = SimHost::new();
    host.add_action_point(1, (i64::MAX, -i64::MAX));
    load(
        "LEVEL_VERSION(1)\n\
         REVEAL_MAP_RECT(PLAYER0, 9223372036854775807, 10, 4, 4)\n\
         REVEAL_MAP_RECT(PLAYER0, -5, 5, 9223372036854775807, 2)\n\
         REVEAL_MAP_LOCATION(PLAYER0, 1, 10)\n",
        &mut host,
    );
    assert_eq!(host.revealed.len(), 3);
    assert_eq!(host.revealed[0], (0, i64::MAX - 2..i64::MAX, 8..12));
    assert_eq!(host.revealed[1].1, -5 - (i64::MAX >> 1)..-5 + (i64::MAX >> 1));
    assert_eq!(host.revealed[2], (0, i64::MAX - 5..i64::MAX, i64::MIN..-i64::MAX + 5));
}

#[test]
fn triggers_on_one_condition_fire_in_script_order() {
    let mut host = SimHost::new();
    host.add_action_point(1, (5, 5));
    let mut engine = load(
        "CREATE_PARTY(RAIDERS)\n\
         ADD_TO_PARTY(RAIDERS, THIEF, 1, 0, STEAL_GOLD, 0)\n\
         IF(PLAYER0, MONEY >= 1000)\n\
         ADD_CREATURE_TO_LEVEL(PLAYER_GOOD, KNIGHT, 1, 1, 1, 0)\n\
         ADD_PARTY_TO_LEVEL(PLAYER_GOOD, RAIDERS, 1, 1)\n\
         ADD_CREATURE_TO_LEVEL(PLAYER_GOOD, WIZARD, 1, 1, 1, 0)\n\
         ENDIF\n",
        &mut host,
    );
    assert_eq!(engine.script().party_triggers.len(), 3);
    run(&mut engine, &mut host, 1);
    assert!(host.creatures.is_empty());

    host.dungeons[0].total_money_owned = 1000;
    run(&mut engine, &mut host, 1);
    let names = &host.names.creatures;
    let kinds: Vec<_> = host.creatures.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        [
            names.id_of("KNIGHT").expect("knight"),
            names.id_of("THIEF").expect("thief"),
            names.id_of("WIZARD").expect("wizard"),
        ]
    );
}

#[test]
fn one_shot_trigger_stays_spent_when_its_condition_returns() {
    let mut host = SimHost::new();
    let mut engine = load(
        "IF(PLAYER0, MONEY >= 1000)\n    CREATURE_AVAILABLE(PLAYER0, HORNY, 1, 1)\nENDIF\n",
        &mut host,
    );
    host.dungeons[0].total_money_owned = 1000;
    run(&mut engine, &mut host, 1);
    assert_eq!(host.creatures_available.get(&(0, 14)), Some(&(1, 1)));

    host.creatures_available.clear();
    host.dungeons[0].total_money_owned = 10;
    run(&mut engine, &mut host, 2);
    host.dungeons[0].total_money_owned = 5000;
    run(&mut engine, &mut host, 3);
    assert!(host.creatures_available.is_empty());
    assert!(
        engine.script().values[0]
            .flags
            .contains(keeper_types::TriggerFlags::DISABLED)
    );
}

#[test]
fn too_many_values_are_dropped() {
    let mut host = SimHost::new();
    let mut text = String::from("LEVEL_VERSION(1)\nIF(PLAYER0, GAME_TURN > 0)\n");
    for _ in 0..65 {
        text.push_str("ADD_GOLD_TO_PLAYER(PLAYER0, 1)\n");
    }
    text.push_str("ENDIF\n");
    let mut engine = load(&text, &mut host);
    assert_eq!(engine.script().values.len(), 64);
    assert_eq!(
        messages(&engine, Severity::Error),
        [(67, "Too many VALUEs in script (limit is 64)")]
    );
    run(&mut engine, &mut host, 1);
    assert_eq!(host.dungeons[0].total_money_owned, 64);
}

#[test]
fn too_many_creature_triggers_are_dropped() {
    let mut host = SimHost::new();
    host.add_action_point(1, (5, 5));
    let mut text = String::from("IF(PLAYER0, GAME_TURN > 0)\n");
    for _ in 0..49 {
        text.push_str("ADD_CREATURE_TO_LEVEL(PLAYER_GOOD, KNIGHT, 1, 1, 1, 0)\n");
    }
    text.push_str("ENDIF\n");
    let mut engine = load(&text, &mut host);
    assert_eq!(engine.script().party_triggers.len(), 48);
    assert_eq!(
        messages(&engine, Severity::Error),
        [(50, "Too many ADD_CREATURE commands in script (limit is 48)")]
    );
    run(&mut engine, &mut host, 1);
    assert_eq!(host.creatures.len(), 48);
}

#[test]
fn child_condition_is_not_read_while_its_parent_is_false() {
    let mut host = SimHost::new();
    let mut engine = load(
        "IF(PLAYER0, MONEY > 100)\n\
         IF(PLAYER1, MONEY > 100)\n\
         ENDIF\n\
         ENDIF\n",
        &mut host,
    );
    host.dungeons[1].total_money_owned = 500;
    let reads = host.dungeon_reads();
    run(&mut engine, &mut host, 3);
    assert_eq!(host.dungeon_reads(), reads + 3);
    assert!(
        !engine.script().conditions[1]
            .status
            .contains(keeper_types::ConditionStatus::MET)
    );

    host.dungeons[0].total_money_owned = 500;
    run(&mut engine, &mut host, 1);
    assert_eq!(host.dungeon_reads(), reads + 5);
    assert!(engine.script().is_condition_met(Some(ConditionId(1))));
}

#[test]
fn oversized_random_bound_is_reported() {
    let mut host = SimHost::new();
    let engine = load(
        "LEVEL_VERSION(1)\nADD_GOLD_TO_PLAYER(PLAYER0, RANDOM(1, 99999999999999999999))\n",
        &mut host,
    );
    assert!(messages(&engine, Severity::Warning).contains(&(
        2,
        "RANDOM second bound '99999999999999999999' interpreted as 9223372036854775807"
    )));
    assert!(host.dungeons[0].total_money_owned >= 1);
}
