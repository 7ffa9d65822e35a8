use std::time::Duration;

use battle_core::{ActorClass, ActorId, ActorParams, CombatError, Weapon};
use battle_runtime::{Encounter, EncounterSnapshot, RuntimeConfig, RuntimeError};
use tokio::time;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const CID: ActorId = ActorId(0);
const STEINER: ActorId = ActorId(1);
const ZIDANE: ActorId = ActorId(2);
const VIVI: ActorId = ActorId(3);

fn goblin() -> ActorParams {
    ActorParams::autonomous("Goblin", 10, 10, 0, 5)
}

/// Party with speeds 25 (Cid), 45 (Steiner), 12 (Zidane) and 30 (Vivi).
fn full_party(encounter: &mut Encounter) {
    let members = [
        (
            ActorParams::controlled(ActorClass::Engineer, "Cid", 80, 10),
            Weapon::axe("Hatchet", 30, 25).unwrap(),
        ),
        (
            ActorParams::controlled(ActorClass::Knight, "Steiner", 120, 20),
            Weapon::sword("Broadsword", 100, 45).unwrap(),
        ),
        (
            ActorParams::controlled(ActorClass::Thief, "Zidane", 90, 8),
            Weapon::knife("Mage Masher", 100, 12).unwrap(),
        ),
        (
            ActorParams::controlled(ActorClass::BlackMage, "Vivi", 60, 5).with_max_mp(40),
            Weapon::staff("Rod", 4, 30, 3).unwrap(),
        ),
    ];
    for (params, weapon) in members {
        encounter.add_party_member(params, weapon).unwrap();
    }
}

#[tokio::test(start_paused = true)]
async fn battle_runs_in_weight_order() {
    init_tracing();
    let mut encounter = Encounter::new(RuntimeConfig::default()).unwrap();
    full_party(&mut encounter);
    let goblin = encounter.add_enemy(goblin()).unwrap();
    encounter.begin().unwrap();

    // Goblin and Zidane share a deadline; enemies are armed first.
    assert_eq!(encounter.next_turn().await.unwrap(), goblin);
    assert_eq!(encounter.next_turn().await.unwrap(), ZIDANE);

    let outcome = encounter.attack(ZIDANE, goblin).unwrap();
    assert_eq!(outcome.taken, 10);
    assert_eq!(outcome.hp_after, 0);
    assert!(outcome.defeated);
    assert!(encounter.is_over());
    assert!(matches!(
        encounter.wait_turn(goblin),
        Err(RuntimeError::Defeated(id)) if id == goblin
    ));

    assert_eq!(encounter.wait_turn(ZIDANE).unwrap(), Duration::from_secs(1));
    assert_eq!(encounter.next_turn().await.unwrap(), CID);
    assert_eq!(encounter.next_turn().await.unwrap(), ZIDANE);
    assert_eq!(encounter.next_turn().await.unwrap(), VIVI);
    assert_eq!(encounter.next_turn().await.unwrap(), STEINER);

    encounter.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn cannot_begin_with_incomplete_party() {
    let mut encounter = Encounter::new(RuntimeConfig::default()).unwrap();
    encounter
        .add_party_member(
            ActorParams::controlled(ActorClass::Knight, "Steiner", 120, 20),
            Weapon::sword("Broadsword", 100, 45).unwrap(),
        )
        .unwrap();

    assert!(matches!(
        encounter.begin(),
        Err(RuntimeError::PartyIncomplete {
            required: 4,
            present: 1
        })
    ));
    assert!(matches!(
        encounter.next_turn().await,
        Err(RuntimeError::NotStarted)
    ));
    assert_eq!(encounter.scheduler().armed_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn begin_only_once() {
    let mut encounter = Encounter::new(RuntimeConfig::default()).unwrap();
    full_party(&mut encounter);
    encounter.begin().unwrap();

    assert!(matches!(encounter.begin(), Err(RuntimeError::AlreadyStarted)));
    assert_eq!(encounter.scheduler().armed_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn party_size_is_bounded() {
    let mut encounter = Encounter::new(RuntimeConfig::default()).unwrap();
    full_party(&mut encounter);

    let err = encounter
        .add_party_member(
            ActorParams::controlled(ActorClass::WhiteMage, "Garnet", 70, 4),
            Weapon::staff("Rod", 4, 30, 3).unwrap(),
        )
        .unwrap_err();

    match err {
        RuntimeError::Integrity(violation) => {
            assert_eq!(violation.field, "Active party members");
            assert_eq!(violation.value, 5);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(encounter.party().count(), 4);
}

#[tokio::test(start_paused = true)]
async fn enemy_count_is_bounded() {
    let mut encounter = Encounter::new(RuntimeConfig::default().with_max_enemies(2)).unwrap();
    encounter.add_enemy(goblin()).unwrap();
    encounter.add_enemy(goblin()).unwrap();

    match encounter.add_enemy(goblin()) {
        Err(RuntimeError::Integrity(violation)) => {
            assert_eq!(violation.field, "Active enemies");
            assert_eq!(violation.value, 3);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(encounter.enemies().count(), 2);
}

#[tokio::test(start_paused = true)]
async fn rejected_member_leaves_roster_unchanged() {
    let mut encounter = Encounter::new(RuntimeConfig::default()).unwrap();

    let denied = encounter.add_party_member(
        ActorParams::controlled(ActorClass::WhiteMage, "Garnet", 70, 4),
        Weapon::sword("Broadsword", 100, 45).unwrap(),
    );
    assert!(matches!(denied, Err(RuntimeError::EquipDenied(_))));

    let invalid = encounter.add_party_member(
        ActorParams::controlled(ActorClass::Knight, "Ghost", 0, 4),
        Weapon::sword("Broadsword", 100, 45).unwrap(),
    );
    assert!(matches!(invalid, Err(RuntimeError::Integrity(_))));

    let wrong_side = encounter.add_party_member(goblin(), Weapon::axe("Hatchet", 30, 25).unwrap());
    assert!(matches!(
        wrong_side,
        Err(RuntimeError::WrongRole {
            class: ActorClass::Autonomous,
            ..
        })
    ));
    assert!(matches!(
        encounter.add_enemy(ActorParams::controlled(ActorClass::Thief, "Zidane", 90, 8)),
        Err(RuntimeError::WrongRole { .. })
    ));

    assert_eq!(encounter.party().count(), 0);
    assert_eq!(encounter.enemies().count(), 0);
    assert_eq!(encounter.add_enemy(goblin()).unwrap(), ActorId(0));
}

#[tokio::test(start_paused = true)]
async fn damage_is_mitigated_by_a_third_of_defense() {
    let mut encounter = Encounter::new(RuntimeConfig::default()).unwrap();
    full_party(&mut encounter);
    let exact = encounter
        .add_enemy(ActorParams::autonomous("Ogre", 30, 9, 30, 10))
        .unwrap();
    let sturdy = encounter
        .add_enemy(ActorParams::autonomous("Ogre", 30, 8, 30, 10))
        .unwrap();

    let outcome = encounter.attack(STEINER, exact).unwrap();
    assert_eq!((outcome.damage, outcome.taken), (100, 9));
    assert_eq!(encounter.actor(exact).unwrap().current_hp(), 0);

    let overkill = encounter.attack(STEINER, sturdy);
    assert!(matches!(
        overkill,
        Err(RuntimeError::Combat(CombatError::Integrity(_)))
    ));
    assert_eq!(encounter.actor(sturdy).unwrap().current_hp(), 8);

    assert!(matches!(
        encounter.attack(exact, STEINER),
        Err(RuntimeError::Defeated(_))
    ));
    assert!(matches!(
        encounter.attack(STEINER, ActorId(99)),
        Err(RuntimeError::UnknownActor(ActorId(99)))
    ));
}

#[tokio::test(start_paused = true)]
async fn weapon_changes_go_through_the_matrix() {
    let mut encounter = Encounter::new(RuntimeConfig::default()).unwrap();
    full_party(&mut encounter);

    let denied = encounter.change_weapon(STEINER, Weapon::bow("Longbow", 20, 15).unwrap());
    assert!(matches!(denied, Err(RuntimeError::EquipDenied(_))));
    assert_eq!(
        encounter.actor(STEINER).unwrap().equipped_weapon().map(Weapon::name),
        Some("Broadsword")
    );

    let previous = encounter
        .change_weapon(STEINER, Weapon::axe("Poleaxe", 60, 35).unwrap())
        .unwrap();
    assert_eq!(previous.as_ref().map(Weapon::name), Some("Broadsword"));
    assert_eq!(encounter.actor(STEINER).unwrap().speed(), Some(35));
}

#[tokio::test(start_paused = true)]
async fn withdrawn_actor_loses_its_turn() {
    let mut encounter = Encounter::new(RuntimeConfig::default()).unwrap();
    full_party(&mut encounter);
    encounter.begin().unwrap();

    assert!(encounter.withdraw(ZIDANE));
    assert!(!encounter.withdraw(ZIDANE));
    assert_eq!(encounter.next_turn().await.unwrap(), CID);
}

#[tokio::test(start_paused = true)]
async fn snapshot_serializes_roster_and_queue() {
    let mut encounter = Encounter::new(RuntimeConfig::default()).unwrap();
    full_party(&mut encounter);
    let goblin = encounter.add_enemy(goblin()).unwrap();
    encounter.begin().unwrap();
    time::sleep(Duration::from_millis(1500)).await;

    let snapshot = encounter.snapshot();
    assert!(snapshot.started);
    assert_eq!(snapshot.queue, vec![goblin, ZIDANE]);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["started"], true);
    assert_eq!(json["queue"], serde_json::json!([4, 2]));
    assert_eq!(json["party"][3]["name"], "Vivi");
    assert_eq!(json["enemies"][0]["name"], "Goblin");
}

#[tokio::test(start_paused = true)]
async fn defeated_targets_cannot_be_attacked_again() {
    let mut encounter = Encounter::new(RuntimeConfig::default()).unwrap();
    full_party(&mut encounter);
    let ogre = encounter
        .add_enemy(ActorParams::autonomous("Ogre", 30, 9, 30, 10))
        .unwrap();
    let guard = encounter
        .add_enemy(ActorParams::autonomous("Guard", 30, 9, 30, 10))
        .unwrap();

    assert!(encounter.attack(STEINER, ogre).unwrap().defeated);

    // 10 damage against defense 30 mitigates to nothing
    encounter
        .change_weapon(STEINER, Weapon::sword("Dull Blade", 10, 20).unwrap())
        .unwrap();
    assert!(matches!(
        encounter.attack(STEINER, ogre),
        Err(RuntimeError::Defeated(id)) if id == ogre
    ));

    let glancing = encounter.attack(STEINER, guard).unwrap();
    assert_eq!((glancing.taken, glancing.hp_after, glancing.defeated), (0, 9, false));
}

#[tokio::test(start_paused = true)]
async fn invalid_roster_limits_are_rejected() {
    let empty_party = Encounter::new(RuntimeConfig::default().with_party_size(-2));
    assert!(matches!(
        empty_party,
        Err(RuntimeError::Integrity(violation)) if violation.field == "Party size"
    ));

    let negative_cap = Encounter::new(RuntimeConfig::default().with_max_enemies(-1));
    assert!(matches!(
        negative_cap,
        Err(RuntimeError::Integrity(violation)) if violation.field == "Max enemies"
    ));
}

#[tokio::test(start_paused = true)]
async fn snapshot_round_trips_and_rejects_tampered_stats() {
    let mut encounter = Encounter::new(RuntimeConfig::default()).unwrap();
    full_party(&mut encounter);
    encounter.add_enemy(goblin()).unwrap();

    let snapshot = encounter.snapshot();
    let json = serde_json::to_value(&snapshot).unwrap();
    let restored: EncounterSnapshot = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(restored, snapshot);

    let mut tampered = json.clone();
    tampered["party"][0]["hp"]["current"] = serde_json::json!(500);
    assert!(serde_json::from_value::<EncounterSnapshot>(tampered).is_err());

    let mut tampered = json.clone();
    tampered["party"][1]["defense"] = serde_json::json!(-7);
    assert!(serde_json::from_value::<EncounterSnapshot>(tampered).is_err());

    let mut tampered = json;
    tampered["party"][1]["weapon"]["weight"] = serde_json::json!(0);
    assert!(serde_json::from_value::<EncounterSnapshot>(tampered).is_err());
}
