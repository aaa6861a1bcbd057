//! Effect token parser.
//!
//! Catalog cards describe their abilities as colon-separated tokens such as
//! `stat:strength:+2:own` or `when_slept:may:sleep_target:opp_toy`. Each
//! token parses into exactly one `ParsedToken`. Errors are plain strings;
//! the catalog loader wraps them with the card and token that failed.
//!
//! ```
//! use tussle_engine::cards::CardKind;
//! use tussle_engine::effects::token::{parse_token, ParsedToken};
//! use tussle_engine::effects::{EffectDef, Effect};
//!
//! let parsed = parse_token("play:gain_cc:2", CardKind::Action).unwrap();
//! assert!(matches!(
//!     parsed,
//!     ParsedToken::Effect(EffectDef::Play(ref c)) if c.effect == Effect::GainCc(2)
//! ));
//! ```

use smallvec::SmallVec;

use super::effect::{
    ActivatedAbility, Clause, ContinuousEffect, Effect, EffectDef, Scope, TargetFilter,
    TargetSpec, TriggeredAbility,
};
use crate::cards::{AltPayment, CardKind, Stat};
use crate::triggers::TriggerCondition;

/// Result of parsing one token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedToken {
    Effect(EffectDef),
    /// `meta:interrupt`
    Interrupt,
    /// `meta:alt:<payment>`
    Alternative(AltPayment),
}

/// Parse one effect token for a card of the given kind.
pub fn parse_token(token: &str, kind: CardKind) -> Result<ParsedToken, String> {
    let parts: Vec<&str> = token.trim().split(':').collect();
    let (head, rest) = match parts.split_first() {
        Some((head, rest)) if !head.is_empty() => (*head, rest),
        _ => return Err("empty token".to_string()),
    };

    let def = match head {
        "meta" => return parse_meta(rest),
        "stat" => {
            let [stat, amount, scope] = exact::<3>(rest, "stat:<stat>:<n>:<scope>")?;
            EffectDef::Continuous(ContinuousEffect::StatBuff {
                stat: parse_stat(stat)?,
                amount: parse_signed(amount)?,
                scope: parse_scope(scope)?,
            })
        }
        "tussle_cost" => {
            let [cost, scope] = exact::<2>(rest, "tussle_cost:<n>:<self|own>")?;
            let scope = parse_scope(scope)?;
            if scope == Scope::Opponent {
                return Err("tussle_cost cannot cover the opponent".to_string());
            }
            EffectDef::Continuous(ContinuousEffect::TussleCost {
                cost: parse_count(cost)?,
                scope,
            })
        }
        "cost_mod" => {
            let [delta, scope] = exact::<2>(rest, "cost_mod:<n>:<own|opponent>")?;
            let scope = parse_scope(scope)?;
            if scope == Scope::Itself {
                return Err("cost_mod covers a player, not a card".to_string());
            }
            EffectDef::Continuous(ContinuousEffect::CostModifier {
                delta: parse_signed(delta)?,
                scope,
            })
        }
        "protect" => parse_protection(rest)?,
        "auto_win_own_turn" => {
            exact::<0>(rest, "auto_win_own_turn")?;
            EffectDef::Continuous(ContinuousEffect::AutoWinOnOwnTurn)
        }
        "immune_auto_win" => {
            let [source] = exact::<1>(rest, "immune_auto_win:<card>")?;
            EffectDef::Continuous(ContinuousEffect::AutoWinImmunity {
                source: source.to_string(),
            })
        }
        "no_tussle" => {
            exact::<0>(rest, "no_tussle")?;
            EffectDef::Continuous(ContinuousEffect::NoTussle)
        }
        "when_slept" | "start_of_turn" | "on_play_other" => {
            let condition = match head {
                "when_slept" => TriggerCondition::WhenSlept,
                "start_of_turn" => TriggerCondition::StartOfTurn,
                _ => TriggerCondition::OnPlayOther,
            };
            let (mode, effect) = rest
                .split_first()
                .ok_or_else(|| format!("{head} needs must|may and an effect"))?;
            let optional = match *mode {
                "must" => false,
                "may" => true,
                other => return Err(format!("expected must|may, found {other:?}")),
            };
            let clause = parse_clause(effect)?;
            if !optional && clause.target.is_some() {
                return Err("mandatory triggers cannot target".to_string());
            }
            EffectDef::Triggered(TriggeredAbility {
                condition,
                optional,
                clause,
            })
        }
        "activated" => {
            let (cost, effect) = rest
                .split_first()
                .ok_or_else(|| "activated needs a cost and an effect".to_string())?;
            EffectDef::Activated(ActivatedAbility {
                cost: parse_count(cost)?,
                clause: parse_clause(effect)?,
            })
        }
        "play" => EffectDef::Play(parse_clause(rest)?),
        _ if kind == CardKind::Action => EffectDef::Play(parse_clause(&parts)?),
        other => return Err(format!("unknown token kind {other:?}")),
    };

    Ok(ParsedToken::Effect(def))
}

fn parse_meta(rest: &[&str]) -> Result<ParsedToken, String> {
    match rest {
        ["interrupt"] => Ok(ParsedToken::Interrupt),
        ["alt", "sleep_own_toy"] => Ok(ParsedToken::Alternative(AltPayment::SleepOwnToy)),
        _ => Err(format!("unknown meta token {:?}", rest.join(":"))),
    }
}

fn parse_protection(rest: &[&str]) -> Result<EffectDef, String> {
    let (who, options) = rest
        .split_first()
        .ok_or_else(|| "protect needs a source side".to_string())?;
    if *who != "opponent" {
        return Err(format!("protect only supports opponent, found {who:?}"));
    }

    let mut exceptions = SmallVec::new();
    for option in options {
        let names = option
            .strip_prefix("except=")
            .ok_or_else(|| format!("unknown protect option {option:?}"))?;
        for name in names.split(',').map(str::trim) {
            if name.is_empty() {
                return Err("empty exception name".to_string());
            }
            exceptions.push(name.to_string());
        }
    }

    Ok(EffectDef::Continuous(ContinuousEffect::Protection {
        exceptions,
    }))
}

/// Parse `<effect>[:args][:<filter>[:count]]`.
fn parse_clause(parts: &[&str]) -> Result<Clause, String> {
    let (name, args) = parts
        .split_first()
        .ok_or_else(|| "missing effect".to_string())?;

    let (effect, rest) = match *name {
        "gain_cc" => {
            let (n, rest) = take(args, "gain_cc:<n>")?;
            (Effect::GainCc(parse_count(n)?), rest)
        }
        "buff_target" => {
            let (stat, rest) = take(args, "buff_target:<stat>:<n>")?;
            let (amount, rest) = take(rest, "buff_target:<stat>:<n>")?;
            let effect = Effect::BuffTarget {
                stat: parse_stat(stat)?,
                amount: parse_signed(amount)?,
            };
            (effect, rest)
        }
        "damage_target" => {
            let (n, rest) = take(args, "damage_target:<n>")?;
            (Effect::DamageTarget(i32::from(parse_count(n)?)), rest)
        }
        "sleep_target" => (Effect::SleepTarget, args),
        "return_target" => (Effect::ReturnTarget, args),
        "take_control" => (Effect::TakeControl, args),
        "wake_target" => (Effect::WakeTarget, args),
        "copy_target" => (Effect::CopyTarget, args),
        "return_all" => (Effect::ReturnAll, args),
        "sleep_all" => (Effect::SleepAll, args),
        "cancel_tussle" => (Effect::CancelTussle, args),
        other => return Err(format!("unknown effect {other:?}")),
    };

    if !effect.is_targeted() {
        if !rest.is_empty() {
            return Err(format!("unexpected arguments {:?}", rest.join(":")));
        }
        return Ok(Clause::untargeted(effect));
    }

    let target = parse_target(rest)?;
    let wants_sleep = effect == Effect::WakeTarget;
    if wants_sleep != (target.filter == TargetFilter::OwnSleep) {
        return Err("target filter does not fit the effect".to_string());
    }
    Ok(Clause::targeted(effect, target))
}

fn parse_target(parts: &[&str]) -> Result<TargetSpec, String> {
    let (filter, rest) = take(parts, "<filter>[:count]")?;
    let filter = match filter {
        "opp_toy" => TargetFilter::OpponentToy,
        "own_toy" => TargetFilter::OwnToy,
        "any_toy" => TargetFilter::AnyToy,
        "own_sleep" => TargetFilter::OwnSleep,
        other => return Err(format!("unknown target filter {other:?}")),
    };
    let count = match rest {
        [] => 1,
        [n] => parse_count(n)?,
        _ => return Err(format!("unexpected arguments {:?}", rest.join(":"))),
    };
    if count == 0 {
        return Err("target count must be positive".to_string());
    }
    Ok(TargetSpec::new(filter, count))
}

fn take<'a, 'b>(parts: &'b [&'a str], shape: &str) -> Result<(&'a str, &'b [&'a str]), String> {
    match parts.split_first() {
        Some((first, rest)) => Ok((first, rest)),
        None => Err(format!("expected {shape}")),
    }
}

fn exact<'a, const N: usize>(parts: &[&'a str], shape: &str) -> Result<[&'a str; N], String> {
    <[&str; N]>::try_from(parts).map_err(|_| format!("expected {shape}"))
}

fn parse_stat(s: &str) -> Result<Stat, String> {
    match s {
        "speed" => Ok(Stat::Speed),
        "strength" => Ok(Stat::Strength),
        "stamina" => Ok(Stat::Stamina),
        other => Err(format!("unknown stat {other:?}")),
    }
}

fn parse_scope(s: &str) -> Result<Scope, String> {
    match s {
        "self" => Ok(Scope::Itself),
        "own" => Ok(Scope::Own),
        "opponent" => Ok(Scope::Opponent),
        other => Err(format!("unknown scope {other:?}")),
    }
}

fn parse_signed(s: &str) -> Result<i32, String> {
    s.parse::<i32>()
        .map_err(|_| format!("expected a signed number, found {s:?}"))
}

fn parse_count(s: &str) -> Result<u8, String> {
    s.parse::<u8>()
        .map_err(|_| format!("expected a count, found {s:?}"))
}
