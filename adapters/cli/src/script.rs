use std::{error::Error, fmt, fs, path::Path};

use anyhow::{Context, Result as AnyResult};
use tallgrass_core::{Direction, InputSnapshot};
use tallgrass_system_panel::ActionTag;

/// Separates a key from its repeat count, as in `d*12`.
const REPEAT_MARKER: char = '*';

/// Starts a comment that runs to the end of the line.
const COMMENT_MARKER: char = '#';

/// Named panel entries reachable through a single key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Shortcut {
    /// Throws a ball at the wild species.
    Catch,
    /// Runs from the encounter.
    Run,
    /// Returns to the parent screen.
    Back,
    /// Saves the collection.
    Save,
    /// Opens the party list in or out of battle.
    Party,
    /// Opens the dex.
    Dex,
    /// Fights the wild species.
    Fight,
    /// Opens the bag in or out of battle.
    Bag,
}

impl Shortcut {
    /// Panel actions the shortcut may resolve to, tried in order.
    #[must_use]
    pub(crate) const fn tags(self) -> &'static [ActionTag] {
        match self {
            Self::Catch => &[ActionTag::Catch],
            Self::Run => &[ActionTag::Run],
            Self::Back => &[ActionTag::Back],
            Self::Save => &[ActionTag::Save],
            Self::Party => &[ActionTag::OpenParty, ActionTag::BattleParty],
            Self::Dex => &[ActionTag::OpenDex],
            Self::Fight => &[ActionTag::Fight],
            Self::Bag => &[ActionTag::OpenBag, ActionTag::BattleBag],
        }
    }
}

/// One tick worth of scripted input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScriptStep {
    /// Holds a direction, optionally with the run modifier.
    Move {
        /// Direction held for the tick.
        direction: Direction,
        /// Whether the run modifier is held.
        run: bool,
    },
    /// Releases every key for one tick.
    Wait,
    /// Chooses the menu entry at the zero-based index.
    Choose(usize),
    /// Chooses a named panel entry.
    Shortcut(Shortcut),
}

impl ScriptStep {
    /// Directional input held while the step plays.
    #[must_use]
    pub(crate) const fn input(self) -> InputSnapshot {
        match self {
            Self::Move { direction, run } => InputSnapshot::toward(direction, run),
            Self::Wait | Self::Choose(_) | Self::Shortcut(_) => InputSnapshot {
                direction: None,
                run: false,
            },
        }
    }
}

/// Sequence of steps replayed one per tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Script {
    steps: Vec<ScriptStep>,
    cursor: usize,
}

impl Script {
    /// Parses a script from text.
    ///
    /// Keys are read left to right, whitespace is ignored and `#` starts a
    /// comment. `wasd` walk and `WASD` run, `.` waits, the digits `1`-`9`
    /// choose a menu entry, and `c`, `r`, `b`, `v`, `p`, `x`, `f` and `g` name
    /// the catch, run, back, save, party, dex, fight and bag entries. Any key
    /// may be followed by `*N` to repeat it `N` times.
    pub(crate) fn parse(source: &str) -> Result<Self, ScriptError> {
        let mut steps = Vec::new();

        for (line_index, line) in source.lines().enumerate() {
            let line_number = line_index + 1;
            let content = line
                .split_once(COMMENT_MARKER)
                .map_or(line, |(content, _)| content);
            let mut chars = content.char_indices().peekable();

            while let Some((offset, key)) = chars.next() {
                if key.is_whitespace() {
                    continue;
                }
                let column = offset + 1;
                let step = step_for_key(key).ok_or(ScriptError::UnknownKey {
                    line: line_number,
                    column,
                    key,
                })?;

                let mut count = 1;
                if chars.peek().map(|(_, next)| *next) == Some(REPEAT_MARKER) {
                    let _ = chars.next();
                    let mut digits = String::new();
                    while let Some((_, digit)) = chars.peek().copied() {
                        if !digit.is_ascii_digit() {
                            break;
                        }
                        digits.push(digit);
                        let _ = chars.next();
                    }
                    count = digits
                        .parse::<usize>()
                        .ok()
                        .filter(|count| *count > 0)
                        .ok_or(ScriptError::InvalidRepeat {
                            line: line_number,
                            column,
                        })?;
                }

                steps.extend(std::iter::repeat(step).take(count));
            }
        }

        Ok(Self { steps, cursor: 0 })
    }

    /// Reads and parses a script file.
    pub(crate) fn from_file(path: &Path) -> AnyResult<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::parse(&source).with_context(|| format!("invalid script {}", path.display()))
    }

    /// Total number of steps in the script.
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns the next step, or `None` once the script is exhausted.
    pub(crate) fn next_step(&mut self) -> Option<ScriptStep> {
        let step = self.steps.get(self.cursor).copied();
        if step.is_some() {
            self.cursor += 1;
        }
        step
    }
}

fn step_for_key(key: char) -> Option<ScriptStep> {
    let step = match key {
        'w' | 'a' | 's' | 'd' | 'W' | 'A' | 'S' | 'D' => {
            let direction = match key.to_ascii_lowercase() {
                'w' => Direction::Up,
                'a' => Direction::Left,
                's' => Direction::Down,
                _ => Direction::Right,
            };
            ScriptStep::Move {
                direction,
                run: key.is_ascii_uppercase(),
            }
        }
        '.' => ScriptStep::Wait,
        '1'..='9' => ScriptStep::Choose(key.to_digit(10)? as usize - 1),
        'c' => ScriptStep::Shortcut(Shortcut::Catch),
        'r' => ScriptStep::Shortcut(Shortcut::Run),
        'b' => ScriptStep::Shortcut(Shortcut::Back),
        'v' => ScriptStep::Shortcut(Shortcut::Save),
        'p' => ScriptStep::Shortcut(Shortcut::Party),
        'x' => ScriptStep::Shortcut(Shortcut::Dex),
        'f' => ScriptStep::Shortcut(Shortcut::Fight),
        'g' => ScriptStep::Shortcut(Shortcut::Bag),
        _ => return None,
    };
    Some(step)
}

/// Errors that can occur while parsing a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScriptError {
    /// A key without a meaning was found.
    UnknownKey {
        /// One-based line of the key.
        line: usize,
        /// One-based column of the key.
        column: usize,
        /// Offending key.
        key: char,
    },
    /// A repeat marker was not followed by a positive count.
    InvalidRepeat {
        /// One-based line of the repeated key.
        line: usize,
        /// One-based column of the repeated key.
        column: usize,
    },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKey { line, column, key } => {
                write!(f, "unknown key {key:?} at line {line}, column {column}")
            }
            Self::InvalidRepeat { line, column } => {
                write!(
                    f,
                    "repeat count after the key at line {line}, column {column} \
                     must be a positive number"
                )
            }
        }
    }
}

impl Error for ScriptError {}

#[cfg(test)]
mod tests {
    use super::{Script, ScriptError, ScriptStep, Shortcut};
    use tallgrass_core::Direction;

    fn collect(mut script: Script) -> Vec<ScriptStep> {
        let mut steps = Vec::new();
        while let Some(step) = script.next_step() {
            steps.push(step);
        }
        steps
    }

    #[test]
    fn keys_map_to_steps() {
        let script = Script::parse("aD. 3 c").expect("valid script");
        assert_eq!(
            collect(script),
            vec![
                ScriptStep::Move {
                    direction: Direction::Left,
                    run: false,
                },
                ScriptStep::Move {
                    direction: Direction::Right,
                    run: true,
                },
                ScriptStep::Wait,
                ScriptStep::Choose(2),
                ScriptStep::Shortcut(Shortcut::Catch),
            ]
        );
    }

    #[test]
    fn repeat_counts_expand_and_comments_are_skipped() {
        let script = Script::parse("# warm up\nd*3 # head east\n.*2\n").expect("valid script");
        assert_eq!(script.len(), 5);
        assert_eq!(
            collect(script)[4],
            ScriptStep::Wait,
            "the wait repeats after the walk"
        );
    }

    #[test]
    fn unknown_keys_report_their_position() {
        assert_eq!(
            Script::parse("dd\n  q"),
            Err(ScriptError::UnknownKey {
                line: 2,
                column: 3,
                key: 'q',
            })
        );
    }

    #[test]
    fn repeat_requires_a_positive_count() {
        assert_eq!(
            Script::parse("w*0"),
            Err(ScriptError::InvalidRepeat { line: 1, column: 1 })
        );
        assert!(Script::parse("w*").is_err());
    }

    #[test]
    fn exhausted_script_yields_nothing() {
        let mut script = Script::parse(".").expect("valid script");
        assert_eq!(script.next_step(), Some(ScriptStep::Wait));
        assert_eq!(script.next_step(), None);
        assert_eq!(script.next_step(), None);
    }

    #[test]
    fn party_shortcut_covers_both_menus() {
        assert_eq!(Shortcut::Party.tags().len(), 2);
    }
}
