use holdem_engine::errors::GameError;
use holdem_engine::player::{ActionKind, PlayerAction as A};
use holdem_engine::rules::{validate_action, BetContext, ValidatedAction};

fn ctx(stack: u32, committed: u32, current_bet: u32, min_raise: u32) -> BetContext {
    BetContext {
        stack,
        committed,
        current_bet,
        min_raise,
    }
}

fn is_illegal(r: Result<ValidatedAction, GameError>) -> bool {
    matches!(r, Err(GameError::IllegalAction { .. }))
}

#[test]
fn bet_is_a_street_total() {
    let va = validate_action("p", &ctx(1000, 0, 0, 20), A::Bet(60)).unwrap();
    assert_eq!(va, ValidatedAction::Bet(60));
}

#[test]
fn bet_below_big_blind_is_illegal() {
    assert!(is_illegal(validate_action("p", &ctx(1000, 0, 0, 20), A::Bet(10))));
    assert!(is_illegal(validate_action("p", &ctx(1000, 0, 0, 20), A::Bet(0))));
}

#[test]
fn bet_facing_a_bet_is_illegal() {
    assert!(is_illegal(validate_action("p", &ctx(1000, 0, 40, 40), A::Bet(100))));
}

#[test]
fn raise_without_a_bet_is_illegal() {
    assert!(is_illegal(validate_action("p", &ctx(1000, 0, 0, 20), A::Raise(100))));
}

#[test]
fn raise_moves_only_the_difference() {
    // committed 20 facing 60, raise to 140
    let va = validate_action("p", &ctx(980, 20, 60, 40), A::Raise(140)).unwrap();
    assert_eq!(va, ValidatedAction::Raise(120));
}

#[test]
fn raise_below_minimum_is_illegal() {
    assert!(is_illegal(validate_action("p", &ctx(980, 20, 60, 40), A::Raise(90))));
}

#[test]
fn raise_to_full_stack_is_all_in() {
    let va = validate_action("p", &ctx(80, 20, 60, 40), A::Raise(100)).unwrap();
    assert_eq!(va, ValidatedAction::AllIn(80));
}

#[test]
fn raise_beyond_stack_is_illegal() {
    assert!(is_illegal(validate_action("p", &ctx(80, 20, 60, 40), A::Raise(500))));
}

#[test]
fn call_with_insufficient_stack_is_allin_call() {
    let va = validate_action("p", &ctx(60, 0, 100, 100), A::Call).unwrap();
    assert_eq!(va, ValidatedAction::AllIn(60));
}

#[test]
fn check_facing_a_bet_is_illegal() {
    let err = validate_action("p", &ctx(1000, 0, 50, 50), A::Check).unwrap_err();
    match err {
        GameError::IllegalAction { player, reason } => {
            assert_eq!(player, "p");
            assert!(reason.contains("check"), "reason: {}", reason);
        }
        other => panic!("expected IllegalAction, got {:?}", other),
    }
}

#[test]
fn call_with_nothing_to_call_is_illegal() {
    assert!(is_illegal(validate_action("p", &ctx(1000, 20, 20, 20), A::Call)));
}

#[test]
fn short_all_in_is_always_allowed() {
    let va = validate_action("p", &ctx(30, 0, 100, 100), A::AllIn).unwrap();
    assert_eq!(va, ValidatedAction::AllIn(30));
}

#[test]
fn legal_actions_carry_bounds() {
    let legal = ctx(990, 10, 20, 20).legal_actions();
    let kinds: Vec<ActionKind> = legal.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ActionKind::Fold,
            ActionKind::Call,
            ActionKind::Raise,
            ActionKind::AllIn
        ]
    );
    let raise = legal[2];
    assert_eq!((raise.min, raise.max), (40, 1000));
    assert_eq!((legal[1].min, legal[1].max), (20, 20));
}

#[test]
fn legal_actions_drop_raise_when_stack_is_short() {
    let legal = ctx(25, 0, 20, 20).legal_actions();
    assert!(legal.iter().all(|a| a.kind != ActionKind::Raise));
    assert!(legal.iter().any(|a| a.kind == ActionKind::AllIn && a.max == 25));
}

#[test]
fn no_legal_actions_without_chips() {
    assert!(ctx(0, 100, 100, 20).legal_actions().is_empty());
}
