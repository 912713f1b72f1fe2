//! Line-oriented editor scripts for headless sessions.
//!
//! One command per line, `#` starts a comment:
//!
//! ```text
//! create                      # sprite with the default texture at the view center
//! click 640 360 [ctrl]        # press and release the left button
//! drag 640 360 700 360        # move the selection
//! drag 640 360 700 400 rotate # drag the rotate handle
//! drag 672 360 704 360 scale 1 0
//! pan 10 -20                  # middle-button drag
//! zoom in | zoom out
//! set x 100 | set angle 45 | set color 1 0 0 | set texture hero.png
//! delete | undo | redo | save | print
//! ```

use std::io::Write;

use seed_core::input::{Modifiers, ScrollDelta};
use seed_core::math::{Color, Vec2};

use crate::commands::PropertyEdit;
use crate::error::{EditorError, EditorResult};
use crate::gesture::{Handle, PointerEvent};
use crate::session::EditorSession;

/// A parsed script command.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Create,
    Click { at: Vec2, ctrl: bool },
    Drag { from: Vec2, to: Vec2, handle: Option<Handle> },
    Pan { delta: Vec2 },
    ZoomIn,
    ZoomOut,
    Set(PropertyEdit),
    Delete,
    Undo,
    Redo,
    Save,
    Print,
}

fn script_error(line: usize, message: impl Into<String>) -> EditorError {
    EditorError::Script {
        line,
        message: message.into(),
    }
}

struct Args<'a> {
    line: usize,
    words: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn word(&mut self, what: &str) -> EditorResult<&'a str> {
        self.words
            .next()
            .ok_or_else(|| script_error(self.line, format!("missing {what}")))
    }

    fn number(&mut self, what: &str) -> EditorResult<f32> {
        let word = self.word(what)?;
        word.parse()
            .map_err(|_| script_error(self.line, format!("invalid {what} `{word}`")))
    }

    fn point(&mut self) -> EditorResult<Vec2> {
        Ok(Vec2::new(self.number("x")?, self.number("y")?))
    }

    fn axis(&mut self) -> EditorResult<i8> {
        let value = self.number("handle axis")?;
        Ok(if value > 0.0 {
            1
        } else if value < 0.0 {
            -1
        } else {
            0
        })
    }

    fn finish(mut self) -> EditorResult {
        match self.words.next() {
            Some(extra) => Err(script_error(self.line, format!("unexpected `{extra}`"))),
            None => Ok(()),
        }
    }
}

fn parse_property(args: &mut Args<'_>) -> EditorResult<PropertyEdit> {
    let name = args.word("property")?;
    let edit = match name {
        "x" => PropertyEdit::PositionX(args.number("value")?),
        "y" => PropertyEdit::PositionY(args.number("value")?),
        "scale_x" => PropertyEdit::ScaleX(args.number("value")?),
        "scale_y" => PropertyEdit::ScaleY(args.number("value")?),
        "align_x" => PropertyEdit::AlignX(args.number("value")?),
        "align_y" => PropertyEdit::AlignY(args.number("value")?),
        "angle" => PropertyEdit::Angle(args.number("value")?),
        "alpha" => PropertyEdit::AlphaPercent(args.number("value")?),
        "color" => PropertyEdit::Color(Color::new(
            args.number("red")?,
            args.number("green")?,
            args.number("blue")?,
            1.0,
        )),
        "texture" => PropertyEdit::Texture(args.word("texture")?.to_owned()),
        other => return Err(script_error(args.line, format!("unknown property `{other}`"))),
    };
    Ok(edit)
}

/// Parses one line. Blank and comment lines yield `None`.
pub fn parse_line(line: usize, text: &str) -> EditorResult<Option<ScriptCommand>> {
    let text = text.split('#').next().unwrap_or_default();
    let mut args = Args {
        line,
        words: text.split_whitespace(),
    };
    let Some(command) = args.words.next() else {
        return Ok(None);
    };
    let command = match command {
        "create" => ScriptCommand::Create,
        "click" => {
            let at = args.point()?;
            let ctrl = match args.words.next() {
                None => false,
                Some("ctrl") => true,
                Some(other) => {
                    return Err(script_error(line, format!("unexpected `{other}`")));
                }
            };
            ScriptCommand::Click { at, ctrl }
        }
        "drag" => {
            let from = args.point()?;
            let to = args.point()?;
            let handle = match args.words.next() {
                None => None,
                Some("rotate") => Some(Handle::Rotate),
                Some("scale") => Some(Handle::Scale {
                    x: args.axis()?,
                    y: args.axis()?,
                }),
                Some(other) => {
                    return Err(script_error(line, format!("unknown handle `{other}`")));
                }
            };
            ScriptCommand::Drag { from, to, handle }
        }
        "pan" => ScriptCommand::Pan {
            delta: args.point()?,
        },
        "zoom" => match args.word("direction")? {
            "in" => ScriptCommand::ZoomIn,
            "out" => ScriptCommand::ZoomOut,
            other => return Err(script_error(line, format!("unknown zoom `{other}`"))),
        },
        "set" => ScriptCommand::Set(parse_property(&mut args)?),
        "delete" => ScriptCommand::Delete,
        "undo" => ScriptCommand::Undo,
        "redo" => ScriptCommand::Redo,
        "save" => ScriptCommand::Save,
        "print" => ScriptCommand::Print,
        other => return Err(script_error(line, format!("unknown command `{other}`"))),
    };
    args.finish()?;
    Ok(Some(command))
}

/// Parses a whole script. Line numbers start at 1.
pub fn parse_script(source: &str) -> EditorResult<Vec<(usize, ScriptCommand)>> {
    let mut commands = Vec::new();
    for (index, text) in source.lines().enumerate() {
        if let Some(command) = parse_line(index + 1, text)? {
            commands.push((index + 1, command));
        }
    }
    Ok(commands)
}

/// Runs one command against a session.
pub fn execute(
    session: &mut EditorSession,
    command: &ScriptCommand,
    out: &mut impl Write,
) -> EditorResult {
    match command {
        ScriptCommand::Create => {
            session.create_sprite()?;
        }
        ScriptCommand::Click { at, ctrl } => {
            let mut event = PointerEvent::left(at.x, at.y);
            if *ctrl {
                event = event.with_modifiers(Modifiers::CTRL);
            }
            session.pointer_down(&event)?;
            session.pointer_up(&event)?;
        }
        ScriptCommand::Drag { from, to, handle } => {
            let mut down = PointerEvent::left(from.x, from.y);
            if let Some(handle) = handle {
                down = down.with_handle(*handle);
            }
            session.pointer_down(&down)?;
            let midpoint = (from + to) * 0.5;
            session.pointer_move(&PointerEvent::left(midpoint.x, midpoint.y));
            let up = PointerEvent::left(to.x, to.y);
            session.pointer_move(&up);
            session.pointer_up(&up)?;
        }
        ScriptCommand::Pan { delta } => {
            let center = session.camera().viewport() * 0.5;
            let end = center + delta;
            session.pointer_down(&PointerEvent::middle(center.x, center.y))?;
            session.pointer_move(&PointerEvent::middle(end.x, end.y));
            session.pointer_up(&PointerEvent::middle(end.x, end.y))?;
        }
        ScriptCommand::ZoomIn => {
            session.scroll(ScrollDelta::vertical(1.0));
        }
        ScriptCommand::ZoomOut => {
            session.scroll(ScrollDelta::vertical(-1.0));
        }
        ScriptCommand::Set(edit) => {
            session.edit_property(edit)?;
        }
        ScriptCommand::Delete => {
            session.delete_selection()?;
        }
        ScriptCommand::Undo => {
            session.undo()?;
        }
        ScriptCommand::Redo => {
            session.redo()?;
        }
        ScriptCommand::Save => session.mark_saved(),
        ScriptCommand::Print => write!(out, "{}", describe(session))?,
    }
    Ok(())
}

/// Parses and runs a script, stopping at the first error.
pub fn run_script(session: &mut EditorSession, source: &str, out: &mut impl Write) -> EditorResult {
    let commands = parse_script(source)?;
    log::info!("Running script ({} commands)", commands.len());
    for (line, command) in &commands {
        log::debug!("line {line}: {command:?}");
        execute(session, command, &mut *out).map_err(|e| match e {
            EditorError::Action(err) => script_error(*line, err.to_string()),
            other => other,
        })?;
    }
    Ok(())
}

/// Human-readable summary of scene, selection and history.
pub fn describe(session: &EditorSession) -> String {
    let doc = session.document();
    let history = session.history();
    let mut text = format!("scene: {} nodes\n", doc.scene.len());
    for id in doc.scene.draw_order() {
        let Some(node) = doc.scene.node(id) else {
            continue;
        };
        text.push_str(&format!(
            "  {id} {} pos=({:.1}, {:.1}) scale=({:.2}, {:.2}) angle={:.1}",
            node.name, node.position.x, node.position.y, node.scale.x, node.scale.y, node.angle,
        ));
        if let Some(texture) = node.texture() {
            text.push_str(&format!(" texture={texture}"));
        }
        text.push('\n');
    }
    let selected: Vec<String> = doc
        .selection()
        .iter()
        .filter_map(|c| c.node())
        .map(|id| id.to_string())
        .collect();
    text.push_str(&format!("selection: [{}]\n", selected.join(", ")));
    text.push_str(&format!(
        "history: {}/{} undo={} redo={}\n",
        history.cursor(),
        history.len(),
        history.undo_description().unwrap_or("-"),
        history.redo_description().unwrap_or("-"),
    ));
    text.push_str(&format!(
        "unsaved: {}\n",
        if session.has_unsaved_changes() { "yes" } else { "no" }
    ));
    text
}
