use holdem_engine::decision::{DecisionRequest, DecisionResponse};
use holdem_engine::engine::{Engine, TableConfig};
use holdem_engine::errors::GameError;
use holdem_engine::player::{Player, PlayerAction, PlayerStatus};

fn shove(_: &DecisionRequest) -> Result<DecisionResponse, GameError> {
    Ok(PlayerAction::AllIn.into())
}

#[test]
fn one_funded_player_cannot_start_a_hand() {
    let players = vec![Player::new("a", 1000), Player::new("b", 0)];
    let mut eng = Engine::new(TableConfig::default(), players, 1).unwrap();
    let mut d = shove;
    let err = eng.play_hand(&mut d).unwrap_err();
    assert_eq!(err, GameError::NotEnoughPlayers { seated: 1 });
}

#[test]
fn busted_seat_sits_out_and_button_skips_it() {
    let players = vec![
        Player::new("a", 1000),
        Player::new("b", 0),
        Player::new("c", 1000),
    ];
    let mut eng = Engine::new(TableConfig::new(5, 10), players, 5).unwrap();
    let mut fold = |_: &DecisionRequest| -> Result<DecisionResponse, GameError> {
        Ok(PlayerAction::Fold.into())
    };
    let rec = eng.play_hand(&mut fold).unwrap();
    assert_eq!(rec.seats.len(), 2, "b is not dealt in");
    assert!(!rec.net.contains_key("b"));
    assert_eq!(eng.players()[1].status(), PlayerStatus::SittingOut);
    assert_eq!(eng.button(), 2);
}

#[test]
fn short_big_blind_posts_what_it_has() {
    let players = vec![Player::new("a", 1000), Player::new("b", 4)];
    let mut eng = Engine::new(TableConfig::new(5, 10), players, 9).unwrap();
    let mut d = shove;
    let rec = eng.play_hand(&mut d).unwrap();
    assert_eq!(rec.blinds[1].player_id, "b");
    assert_eq!(rec.blinds[1].amount, 4);
    assert_eq!(eng.total_chips(), 1004);
    assert_eq!(rec.board.len(), 5);
}

#[test]
fn invalid_tables_are_rejected() {
    let one = vec![Player::new("a", 100)];
    assert!(matches!(
        Engine::new(TableConfig::default(), one, 0),
        Err(GameError::InvalidConfig(_))
    ));
    let dup = vec![Player::new("a", 100), Player::new("a", 100)];
    assert!(matches!(
        Engine::new(TableConfig::default(), dup, 0),
        Err(GameError::InvalidConfig(_))
    ));
    let eleven: Vec<Player> = (0..11).map(|i| Player::new(format!("p{}", i), 100)).collect();
    assert!(Engine::new(TableConfig::default(), eleven, 0).is_err());
    let bad_blinds = TableConfig::new(20, 10);
    let two = vec![Player::new("a", 100), Player::new("b", 100)];
    assert!(Engine::new(bad_blinds, two, 0).is_err());
}
