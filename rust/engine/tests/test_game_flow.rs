use holdem_engine::cards::Card;
use holdem_engine::decision::{DecisionRequest, DecisionResponse};
use holdem_engine::deck::Deck;
use holdem_engine::engine::{Engine, TableConfig};
use holdem_engine::errors::GameError;
use holdem_engine::hand::Category;
use holdem_engine::logger::{Blind, Street};
use holdem_engine::player::{ActionKind, Player, PlayerAction, Position};

fn cards(text: &str) -> Vec<Card> {
    text.split_whitespace()
        .map(|t| t.parse().expect("card literal"))
        .collect()
}

fn stacked(text: &str) -> Deck {
    Deck::stacked(&cards(text)).expect("distinct cards")
}

fn passive(req: &DecisionRequest) -> Result<DecisionResponse, GameError> {
    let action = if req.can(ActionKind::Check) {
        PlayerAction::Check
    } else {
        PlayerAction::Call
    };
    Ok(action.into())
}

fn always(
    action: PlayerAction,
) -> impl FnMut(&DecisionRequest) -> Result<DecisionResponse, GameError> {
    move |_| Ok(action.into())
}

fn heads_up(stack_a: u32, stack_b: u32) -> Engine {
    let players = vec![Player::new("alice", stack_a), Player::new("bob", stack_b)];
    Engine::new(TableConfig::new(5, 10), players, 7).expect("valid table")
}

#[test]
fn heads_up_check_down_awards_pot_to_better_hand() {
    let mut eng = heads_up(1000, 1000);
    // bob, alice, bob, alice, then flop turn river
    let deck = stacked("7c Ah 2d Ad Ks 9h 5c 3s Jd");
    let mut decider = passive;
    let rec = eng
        .play_hand_with_deck(deck, None, &mut decider)
        .expect("hand completes");

    assert_eq!(rec.button, "alice");
    assert_eq!(rec.blinds.len(), 2);
    assert_eq!(rec.blinds[0].player_id, "alice");
    assert_eq!(rec.blinds[0].blind, Blind::Small);
    assert_eq!(rec.blinds[0].amount, 5);
    assert_eq!(rec.blinds[1].player_id, "bob");
    assert_eq!(rec.blinds[1].amount, 10);

    assert_eq!(rec.actions.len(), 8);
    assert_eq!(rec.actions[0].player_id, "alice");
    assert_eq!(rec.actions[0].action, ActionKind::Call);
    assert_eq!(rec.actions[0].amount, 5);
    assert_eq!(rec.actions[1].player_id, "bob");
    assert_eq!(rec.actions[1].action, ActionKind::Check);
    // postflop the big blind acts first heads-up
    assert_eq!(rec.actions[2].player_id, "bob");
    assert_eq!(rec.actions[2].street, Street::Flop);
    assert!(rec.actions[2..]
        .iter()
        .all(|a| a.action == ActionKind::Check));

    assert_eq!(rec.board, cards("Ks 9h 5c 3s Jd"));
    assert_eq!(rec.pots.len(), 1);
    assert_eq!(rec.pots[0].amount, 20);
    assert_eq!(rec.winners(), vec!["alice"]);
    assert_eq!(rec.net["alice"], 10);
    assert_eq!(rec.net["bob"], -10);
    assert_eq!(rec.net_sum(), 0);

    let shown = rec.showdown.as_ref().expect("went to showdown");
    assert_eq!(shown.len(), 2);
    assert_eq!(shown[0].player_id, "bob");
    assert_eq!(shown[1].rank.category, Category::OnePair);

    assert_eq!(eng.players()[0].stack(), 1010);
    assert_eq!(eng.players()[1].stack(), 990);
    assert_eq!(eng.total_chips(), 2000);
    assert_eq!(eng.button(), 1, "button moves to bob");
}

#[test]
fn seeded_check_down_conserves_chips() {
    let mut eng = heads_up(1000, 1000);
    let mut decider = passive;
    let rec = eng.play_hand(&mut decider).unwrap();
    let stacks = (eng.players()[0].stack(), eng.players()[1].stack());
    assert!(
        [(1010, 990), (990, 1010), (1000, 1000)].contains(&stacks),
        "unexpected stacks {:?}",
        stacks
    );
    assert_eq!(eng.total_chips(), 2000);
    assert_eq!(rec.seed, Some(7));
    assert_eq!(rec.board.len(), 5);
    assert_eq!(rec.seats[0].position, Position::Button);
    assert_eq!(rec.seats[1].position, Position::BigBlind);
}

#[test]
fn same_seed_replays_the_same_hand() {
    let mut a = heads_up(1000, 1000);
    let mut b = heads_up(1000, 1000);
    let mut d1 = passive;
    let mut d2 = passive;
    let r1 = a.play_hand(&mut d1).unwrap();
    let r2 = b.play_hand(&mut d2).unwrap();
    assert_eq!(r1.board, r2.board);
    assert_eq!(r1.showdown, r2.showdown);
    assert_eq!(r1.net, r2.net);
}

#[test]
fn fold_preflop_ends_hand_without_dealing_board() {
    let mut eng = heads_up(1000, 1000);
    let mut decider = always(PlayerAction::Fold);
    let rec = eng.play_hand(&mut decider).unwrap();
    assert!(rec.board.is_empty());
    assert!(rec.showdown.is_none());
    assert_eq!(rec.pots.len(), 1);
    assert!(rec.pots[0].uncontested);
    assert_eq!(rec.pots[0].amount, 15);
    assert_eq!(eng.players()[0].stack(), 995);
    assert_eq!(eng.players()[1].stack(), 1005);
}

#[test]
fn three_handed_tie_gives_odd_chip_left_of_button() {
    let players = vec![
        Player::new("btn", 1000),
        Player::new("sb", 1000),
        Player::new("bb", 1000),
    ];
    let mut eng = Engine::new(TableConfig::new(5, 10), players, 1).unwrap();
    // deal order sb, bb, btn twice; the board is a royal flush
    let deck = stacked("2c 4d 6s 3c 5d 7s Ah Kh Qh Jh Th");
    let mut decider = |req: &DecisionRequest| -> Result<DecisionResponse, GameError> {
        if req.player_id == "sb" {
            Ok(PlayerAction::Fold.into())
        } else {
            passive(req)
        }
    };
    let rec = eng.play_hand_with_deck(deck, None, &mut decider).unwrap();

    assert_eq!(rec.actions[0].player_id, "btn", "under the gun is the button three-handed");
    assert_eq!(rec.pots.len(), 1);
    assert_eq!(rec.pots[0].amount, 25);
    assert_eq!(rec.pots[0].winners[0].player_id, "bb");
    assert_eq!(rec.pots[0].winners[0].amount, 13);
    assert_eq!(rec.pots[0].winners[1].player_id, "btn");
    assert_eq!(rec.pots[0].winners[1].amount, 12);
    assert_eq!(rec.net["btn"], 2);
    assert_eq!(rec.net["sb"], -5);
    assert_eq!(rec.net["bb"], 3);
    assert_eq!(eng.total_chips(), 3000);
}

#[test]
fn all_ins_at_different_depths_build_side_pots() {
    let players = vec![
        Player::new("a", 1000),
        Player::new("b", 100),
        Player::new("c", 300),
    ];
    let mut eng = Engine::new(TableConfig::new(5, 10), players, 3).unwrap();
    // b: aces, c: kings, a: seven-deuce
    let deck = stacked("As Ks 7c Ad Kd 2h 3s 8d 9c Jh 4c");
    let mut shove = always(PlayerAction::AllIn);
    let rec = eng.play_hand_with_deck(deck, None, &mut shove).unwrap();

    assert_eq!(rec.pots.len(), 3);
    assert_eq!(rec.pots[0].amount, 300);
    assert_eq!(rec.pots[0].eligible, vec!["a", "b", "c"]);
    assert_eq!(rec.pots[0].winners[0].player_id, "b");
    assert_eq!(rec.pots[1].amount, 400);
    assert_eq!(rec.pots[1].eligible, vec!["a", "c"]);
    assert_eq!(rec.pots[1].winners[0].player_id, "c");
    assert_eq!(rec.pots[2].amount, 700);
    assert!(rec.pots[2].uncontested, "uncalled chips return to a");

    let stacks: Vec<u32> = eng.players().iter().map(|p| p.stack()).collect();
    assert_eq!(stacks, vec![700, 300, 400]);
    assert_eq!(rec.board.len(), 5, "board runs out with everyone all-in");
    assert_eq!(rec.showdown.as_ref().map(|s| s.len()), Some(3));
}

#[test]
fn raise_and_call_preflop_then_check_down() {
    let mut eng = heads_up(1000, 1000);
    let mut decider = |req: &DecisionRequest| -> Result<DecisionResponse, GameError> {
        if req.street == Street::Preflop && req.player_id == "alice" && req.to_call > 0 {
            return Ok(PlayerAction::Raise(30).into());
        }
        passive(req)
    };
    let rec = eng.play_hand(&mut decider).unwrap();
    assert_eq!(rec.actions[0].action, ActionKind::Raise);
    assert_eq!(rec.actions[0].to, 30);
    assert_eq!(rec.actions[0].amount, 25);
    assert!(rec.actions[0].aggressive);
    assert_eq!(rec.actions[1].action, ActionKind::Call);
    assert_eq!(rec.actions[1].amount, 20);
    let pot: u32 = rec.pots.iter().map(|p| p.amount).sum();
    assert_eq!(pot, 60);
    assert_eq!(rec.net_sum(), 0);
}

#[test]
fn session_runs_until_one_player_has_everything() {
    let mut eng = heads_up(200, 200);
    let mut shove = always(PlayerAction::AllIn);
    let records = eng.play_session(&mut shove, 500).unwrap();
    assert!(!records.is_empty());
    assert!(records.iter().all(|r| r.net_sum() == 0));
    assert_eq!(eng.total_chips(), 400);
    if records.len() < 500 {
        assert_eq!(eng.seats_with_chips(), 1);
    }
    let numbers: Vec<u64> = records.iter().map(|r| r.hand_no).collect();
    assert_eq!(numbers, (0..records.len() as u64).collect::<Vec<_>>());
}
