//! Mini-grammars of card definition text.
//!
//! Card definitions encode small values in delimiter-separated strings.
//! Each grammar has one entry point here returning `None` for text it does
//! not recognize; callers decide whether that skips a clause or means "no
//! effect".
//!
//! | grammar | example |
//! |---|---|
//! | counter delta | `inc-megacredits-5`, `dec-plantprod-1` |
//! | tile placement | `placetile/Ocean/Ocean/true` |
//! | resource amount | `42 megacredit`, `1 steelprod` |
//! | cost | `MegaCredits/8` |
//! | active action | `placetile-Ocean`, `resourcetransaction-Plant-1` |
//! | income condition | `incgen-Plant` |
//! | effect condition | `placetile(Ocean,any,onMars)`, `playcard(tag-Space)` |
//! | requirement sentence | `Science Science tags`, `5 oxygen max` |
//! | points | `2`, `1/3`, `1/` |

use std::collections::BTreeMap;

use crate::games::terraforming::actions::TileDestination;
use crate::games::terraforming::types::{resolve, MapTileType, Resource, Tag, Tile};

/// Signed change to a named counter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterDelta {
    pub target: String,
    pub amount: i32,
}

/// `kind-target-amount`; negative when the text contains `dec`.
pub fn counter_delta(encoding: &str) -> Option<CounterDelta> {
    let mut parts = encoding.split('-');
    let _kind = parts.next()?;
    let target = parts.next()?.trim();
    let amount: i32 = parts.next()?.trim().parse().ok()?;
    if target.is_empty() {
        return None;
    }
    let amount = if encoding.contains("dec") { -amount } else { amount };
    Some(CounterDelta {
        target: target.to_string(),
        amount,
    })
}

/// Resource key with an optional `prod` suffix, e.g. `steelprod`.
pub fn resource_key(key: &str) -> Option<(Resource, bool)> {
    let key = key.trim();
    match key.to_ascii_lowercase().find("prod") {
        Some(at) => resolve(&key[..at]).map(|r| (r, true)),
        None => resolve(key).map(|r| (r, false)),
    }
}

/// Parsed tile placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileSpec {
    /// Tile name as written.
    pub tile_name: String,
    pub tile: Option<Tile>,
    pub destination: TileDestination,
    pub on_mars: bool,
}

/// `placetile/tile/destination/onMars`.
///
/// A destination naming a map region becomes a region placement; anything
/// else is a named location. `onMars` is true only for the literal `true`.
pub fn tile_placement(encoding: &str) -> Option<TileSpec> {
    let parts: Vec<&str> = encoding.split('/').map(str::trim).collect();
    let [_, tile_name, destination, on_mars, ..] = parts.as_slice() else {
        return None;
    };
    let destination = match resolve::<MapTileType>(destination) {
        Some(region) => TileDestination::Region(region),
        None => TileDestination::Named((*destination).to_string()),
    };
    Some(TileSpec {
        tile_name: (*tile_name).to_string(),
        tile: resolve(tile_name),
        destination,
        on_mars: on_mars.eq_ignore_ascii_case("true"),
    })
}

/// A starting stock or production amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceAmount {
    pub resource: Resource,
    pub amount: i32,
    pub production: bool,
}

/// `amount resource[prod]`.
pub fn resource_amount(entry: &str) -> Option<ResourceAmount> {
    let mut words = entry.split_whitespace();
    let amount: i32 = words.next()?.parse().ok()?;
    let (resource, production) = resource_key(words.next()?)?;
    Some(ResourceAmount { resource, amount, production })
}

/// `resource/amount`. The amount is returned as a positive cost.
pub fn cost_spec(text: &str) -> Option<(Resource, i32)> {
    let (resource, amount) = text.split_once('/')?;
    let amount: i32 = amount.trim().parse().ok()?;
    Some((resolve(resource)?, amount.abs()))
}

/// Primitive inside a card's active action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveActionSpec {
    PlaceTile(Tile),
    ResourceTransaction { resource: Resource, amount: i32 },
}

/// `placetile-Tile` or `resourcetransaction-Resource-amount`.
pub fn active_action(text: &str) -> Option<ActiveActionSpec> {
    let parts: Vec<&str> = text.split('-').map(str::trim).collect();
    match parts.as_slice() {
        [kind, tile, ..] if kind.eq_ignore_ascii_case("placetile") => {
            resolve(tile).map(ActiveActionSpec::PlaceTile)
        }
        [kind, resource, amount, ..] if kind.eq_ignore_ascii_case("resourcetransaction") => {
            Some(ActiveActionSpec::ResourceTransaction {
                resource: resolve(resource)?,
                amount: amount.parse().ok()?,
            })
        }
        _ => None,
    }
}

/// `incgen-Resource`: the resource rose this generation.
pub fn income_condition(text: &str) -> Option<Resource> {
    if !text.contains("incgen") {
        return None;
    }
    resolve(text.split('-').nth(1)?)
}

/// `kind(arg,arg,...)` with `any` and `onMars` flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectCondition {
    /// Lowercased kind.
    pub kind: String,
    pub args: Vec<String>,
    /// Triggered by any player's actions.
    pub any_player: bool,
    pub on_mars: bool,
}

pub fn effect_condition(text: &str) -> Option<EffectCondition> {
    let (kind, rest) = text.split_once('(')?;
    let inner = rest.replace(')', "");
    let args = inner
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect();
    Some(EffectCondition {
        kind: kind.trim().to_ascii_lowercase(),
        args,
        any_player: text.contains("any"),
        on_mars: text.contains("onMars"),
    })
}

/// `gain A/B`: resources a tile placement must grant.
pub fn gained_resources(arg: &str) -> Option<Vec<Resource>> {
    let list = arg.trim().strip_prefix("gain")?;
    list.split('/').map(resolve).collect()
}

/// One sentence of a requirement text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequirementClause {
    /// Minimum count per tag; repeated names add up.
    Tags(BTreeMap<Tag, u32>),
    /// Tile-count requirement; recognized but not modeled.
    Tile,
    Counter { counter: String, threshold: i32, max: bool },
}

/// Classify and parse one requirement sentence.
///
/// Returns `None` when a tag name does not resolve or a counter sentence is
/// not `threshold counter [max]`.
pub fn requirement_sentence(sentence: &str) -> Option<RequirementClause> {
    let sentence = sentence.trim();
    if sentence.contains("tags") {
        let mut counts = BTreeMap::new();
        for word in sentence.replace("tags", "").split_whitespace() {
            let tag: Tag = resolve(word)?;
            *counts.entry(tag).or_insert(0) += 1;
        }
        return (!counts.is_empty()).then_some(RequirementClause::Tags(counts));
    }
    if sentence.contains("tile") {
        return Some(RequirementClause::Tile);
    }

    let max = sentence.contains("max");
    let rest = sentence.replace("max", "");
    let mut words = rest.split_whitespace();
    let threshold: i32 = words.next()?.trim_end_matches('%').parse().ok()?;
    let counter = words.next()?.to_string();
    Some(RequirementClause::Counter { counter, threshold, max })
}

/// Point value: `n`, `a/b` (a fraction per token) or `a/` (a per token).
pub fn points_value(text: &str) -> Option<f64> {
    let text = text.trim();
    match text.split_once('/') {
        None => text.parse().ok(),
        Some((a, "")) => a.trim().parse().ok(),
        Some((a, b)) => {
            let a: f64 = a.trim().parse().ok()?;
            let b: f64 = b.trim().parse().ok()?;
            (b != 0.0).then(|| a / b)
        }
    }
}

/// Digits of `text` as a number, e.g. `#042` -> 42.
pub fn card_number(text: &str) -> Option<u32> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}
