//! Plain-text scene description.
//!
//! ```text
//! # comment
//! texture a wall1_color.png            # symbol, file under the asset dir [, fallback colour]
//! color   g 0.2 0.8 0.2 1              # symbol, rgba  (or a colour name)
//! floor   g                            # one symbol = uniform, two = checkerboard
//! ceiling r b
//! player  5.5 4.5 225                  # x y heading in degrees
//! sprite  s 5.5 2.5 0.5                # texture symbol, x y [scale]
//! map
//! ..ab....
//! .  a
//! ```
//!
//! Everything after `map` is the grid: `.` and space are empty cells, any
//! other character must be a declared symbol. Short rows are padded.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use glam::DVec2;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::color::Color;
use super::player::Player;
use super::scene::{Block, Scene, SurfaceRule};
use super::sprite::Sprite;
use super::texture::{Paint, TextureBank};

/// Errors raised while reading a map description.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {msg}")]
    Syntax { line: usize, msg: String },

    #[error("line {line}: unknown symbol `{symbol}`")]
    UnknownSymbol { line: usize, symbol: char },

    #[error("map has no grid rows")]
    Empty,
}

/// Everything a map file describes.
#[derive(Debug)]
pub struct MapDef {
    pub scene: Scene,
    pub spawn: Option<Player>,
    pub sprites: Vec<Sprite>,
}

static DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<kw>texture|color|floor|ceiling|player|sprite)\s+(?P<args>\S.*?)\s*$")
        .unwrap()
});

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*#.*$").unwrap());

/// Read and parse `path`; texture paths resolve against `assets`.
pub fn load_map(path: &Path, assets: &Path, bank: &mut TextureBank) -> Result<MapDef, MapError> {
    let src = std::fs::read_to_string(path)?;
    parse_map(&src, assets, bank)
}

pub fn parse_map(src: &str, assets: &Path, bank: &mut TextureBank) -> Result<MapDef, MapError> {
    let mut symbols: HashMap<char, Paint> = HashMap::new();
    let mut floor = SurfaceRule::default_floor();
    let mut ceiling = SurfaceRule::default_ceiling();
    let mut spawn = None;
    let mut sprite_defs: Vec<(usize, char, DVec2, f64)> = Vec::new();

    let mut lines = src.lines().enumerate().map(|(i, l)| (i + 1, l));

    /* ---------------- header ------------------------------------------- */
    let mut saw_map = false;
    for (line, raw) in lines.by_ref() {
        let text = COMMENT.replace(raw, "");
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        if text == "map" {
            saw_map = true;
            break;
        }
        let caps = DIRECTIVE.captures(text).ok_or_else(|| MapError::Syntax {
            line,
            msg: format!("unrecognised directive `{text}`"),
        })?;
        let args: Vec<&str> = caps["args"].split_whitespace().collect();

        match &caps["kw"] {
            "texture" => {
                expect_args(line, &args, 2..=3)?;
                let sym = symbol(line, args[0])?;
                let fallback = match args.get(2) {
                    Some(name) => named_color(line, name)?,
                    None => Color::purple(),
                };
                let paint = bank.load_or(args[1], assets.join(args[1]), fallback);
                symbols.insert(sym, paint);
            }
            "color" => {
                let sym = symbol(line, args.first().copied().unwrap_or_default())?;
                let color = match args.len() {
                    2 => named_color(line, args[1])?,
                    4 | 5 => {
                        let ch = numbers(line, &args[1..])?;
                        Color::new(ch[0], ch[1], ch[2], ch.get(3).copied().unwrap_or(1.0))
                    }
                    n => {
                        return Err(MapError::Syntax {
                            line,
                            msg: format!("color takes a name or 3-4 channels, got {}", n - 1),
                        });
                    }
                };
                symbols.insert(sym, Paint::Flat(color));
            }
            kw @ ("floor" | "ceiling") => {
                expect_args(line, &args, 1..=2)?;
                let even = lookup(&symbols, line, symbol(line, args[0])?)?;
                let odd = match args.get(1) {
                    Some(s) => lookup(&symbols, line, symbol(line, s)?)?,
                    None => even,
                };
                let rule = SurfaceRule::checker(even, odd);
                if kw == "floor" {
                    floor = rule;
                } else {
                    ceiling = rule;
                }
            }
            "player" => {
                expect_args(line, &args, 3..=3)?;
                let n = numbers(line, &args)?;
                spawn = Some(Player::new(DVec2::new(n[0], n[1]), n[2].to_radians()));
            }
            "sprite" => {
                expect_args(line, &args, 3..=4)?;
                let sym = symbol(line, args[0])?;
                let n = numbers(line, &args[1..])?;
                let scale = n.get(2).copied().unwrap_or(1.0);
                sprite_defs.push((line, sym, DVec2::new(n[0], n[1]), scale));
            }
            _ => unreachable!("regex only admits known keywords"),
        }
    }

    if !saw_map {
        return Err(MapError::Empty);
    }

    /* ---------------- grid --------------------------------------------- */
    let mut rows = Vec::new();
    for (line, raw) in lines {
        let row = raw
            .trim_end()
            .chars()
            .map(|c| match c {
                '.' | ' ' => Ok(Block::Empty),
                _ => lookup(&symbols, line, c).map(Block::from),
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }
    while rows.last().is_some_and(Vec::is_empty) {
        rows.pop();
    }
    if rows.is_empty() {
        return Err(MapError::Empty);
    }

    /* ---------------- sprites ------------------------------------------ */
    let mut sprites = Vec::with_capacity(sprite_defs.len());
    for (line, sym, pos, scale) in sprite_defs {
        match lookup(&symbols, line, sym)? {
            Paint::Textured(id) => sprites.push(Sprite::new(id, pos, scale)),
            Paint::Flat(_) => warn!("line {line}: sprite `{sym}` has no texture, skipped"),
        }
    }

    let scene = Scene::new(rows).with_surfaces(floor, ceiling);
    debug!(
        "map: {} symbols, {} sprites, spawn {:?}",
        symbols.len(),
        sprites.len(),
        spawn.map(|p: Player| p.position)
    );

    Ok(MapDef {
        scene,
        spawn,
        sprites,
    })
}

/*──────────────────────── helpers ─────────────────────────────*/

fn expect_args(
    line: usize,
    args: &[&str],
    range: std::ops::RangeInclusive<usize>,
) -> Result<(), MapError> {
    if range.contains(&args.len()) {
        Ok(())
    } else {
        Err(MapError::Syntax {
            line,
            msg: format!(
                "expected {}..={} arguments, got {}",
                range.start(),
                range.end(),
                args.len()
            ),
        })
    }
}

fn symbol(line: usize, arg: &str) -> Result<char, MapError> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '.' && c != '#' => Ok(c),
        _ => Err(MapError::Syntax {
            line,
            msg: format!("`{arg}` is not a single-character symbol"),
        }),
    }
}

fn lookup(symbols: &HashMap<char, Paint>, line: usize, symbol: char) -> Result<Paint, MapError> {
    symbols
        .get(&symbol)
        .copied()
        .ok_or(MapError::UnknownSymbol { line, symbol })
}

fn named_color(line: usize, name: &str) -> Result<Color, MapError> {
    Color::by_name(name).ok_or_else(|| MapError::Syntax {
        line,
        msg: format!("unknown colour `{name}`"),
    })
}

fn numbers(line: usize, args: &[&str]) -> Result<Vec<f64>, MapError> {
    args.iter()
        .map(|a| {
            a.parse::<f64>().map_err(|e| MapError::Syntax {
                line,
                msg: format!("`{a}`: {e}"),
            })
        })
        .collect()
}
