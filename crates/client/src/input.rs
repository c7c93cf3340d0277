//! Parsing of typed player commands.
//!
//! ```text
//! a | attack             basic attack
//! s <slot> [ally]        use a skill; `ally` picks a friendly target by id
//! d | defend             defend until the next turn
//! q | retreat            give up (ends the battle as a defeat)
//! ```

use game_core::{ActionMenu, CombatantId, TargetRule};
use runtime::Decision;
use thiserror::Error;

/// What the player typed, once understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    Decide(Decision),
    Retreat,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("empty input")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("expected a skill slot number")]
    MissingSlot,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("no skill in slot {0}")]
    NoSuchSkill(usize),

    #[error("ally #{0} cannot be targeted")]
    InvalidAlly(u32),
}

/// Parses one line against the menu it answers.
///
/// Affordability is left to the coordinator, which rejects and re-prompts.
pub fn parse_input(line: &str, menu: &ActionMenu) -> Result<PlayerInput, InputError> {
    let mut words = line.split_whitespace();
    let command = words.next().ok_or(InputError::Empty)?;

    match command.to_ascii_lowercase().as_str() {
        "a" | "attack" => Ok(PlayerInput::Decide(Decision::BasicAttack)),
        "d" | "defend" => Ok(PlayerInput::Decide(Decision::Defend)),
        "q" | "retreat" => Ok(PlayerInput::Retreat),
        "s" | "skill" => {
            let slot = parse_number(words.next().ok_or(InputError::MissingSlot)?)?;
            let option = menu.skill(slot).ok_or(InputError::NoSuchSkill(slot))?;

            let ally = match words.next() {
                Some(word) if option.target == TargetRule::SingleFriendly => {
                    let id = CombatantId(parse_number(word.trim_start_matches('#'))?);
                    if !menu.allies.contains(&id) {
                        return Err(InputError::InvalidAlly(id.0));
                    }
                    Some(id)
                }
                _ => None,
            };
            Ok(PlayerInput::Decide(Decision::Skill { slot, ally }))
        }
        other => Err(InputError::UnknownCommand(other.to_string())),
    }
}

fn parse_number<T: std::str::FromStr>(word: &str) -> Result<T, InputError> {
    word.parse()
        .map_err(|_| InputError::NotANumber(word.to_string()))
}

#[cfg(test)]
mod tests {
    use game_core::{SkillKind, SkillOption};

    use super::*;

    fn menu() -> ActionMenu {
        let option = |slot, name: &str, target| SkillOption {
            slot,
            name: name.to_string(),
            mana_cost: 5,
            kind: SkillKind::Heal,
            power: 10,
            target,
            affordable: true,
        };
        ActionMenu {
            actor: CombatantId(0),
            basic_attack: true,
            skills: vec![
                option(0, "Cure", TargetRule::SingleFriendly),
                option(1, "Mend", TargetRule::SelfOnly),
            ],
            defend: true,
            allies: vec![CombatantId(0), CombatantId(1)],
            foes: vec![CombatantId(2)],
        }
    }

    #[test]
    fn simple_commands() {
        let menu = menu();
        assert_eq!(
            parse_input("attack", &menu),
            Ok(PlayerInput::Decide(Decision::BasicAttack))
        );
        assert_eq!(parse_input(" D ", &menu), Ok(PlayerInput::Decide(Decision::Defend)));
        assert_eq!(parse_input("q", &menu), Ok(PlayerInput::Retreat));
    }

    #[test]
    fn skill_with_ally_target() {
        assert_eq!(
            parse_input("s 0 #1", &menu()),
            Ok(PlayerInput::Decide(Decision::Skill {
                slot: 0,
                ally: Some(CombatantId(1))
            }))
        );
    }

    #[test]
    fn ally_ignored_for_other_target_rules() {
        assert_eq!(
            parse_input("s 1 7", &menu()),
            Ok(PlayerInput::Decide(Decision::Skill { slot: 1, ally: None }))
        );
    }

    #[test]
    fn bad_input_is_explained() {
        let menu = menu();
        assert_eq!(parse_input("", &menu), Err(InputError::Empty));
        assert_eq!(parse_input("s", &menu), Err(InputError::MissingSlot));
        assert_eq!(parse_input("s 4", &menu), Err(InputError::NoSuchSkill(4)));
        assert_eq!(parse_input("s 0 2", &menu), Err(InputError::InvalidAlly(2)));
        assert_eq!(
            parse_input("s x", &menu),
            Err(InputError::NotANumber("x".into()))
        );
        assert_eq!(
            parse_input("dance", &menu),
            Err(InputError::UnknownCommand("dance".into()))
        );
    }
}
