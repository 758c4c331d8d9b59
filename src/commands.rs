//! Console commands over the stores.

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use std::fmt::Write;

use crate::app::App;
use crate::error::StoreError;
use crate::format::{format_long_date, format_price, format_thousands};
use crate::map::MapView;
use crate::models::{parse_id, Listing, PropertyType};
use crate::services::inquiry::InquiryDraft;
use crate::services::types::neutral_bound;
use crate::services::{FavoriteStore, PropertySource, SearchFilters, Toggled};

pub const USAGE: &str = "\
Usage: housing-browser [--json] [--help] <command>

Commands:
  list                          all listings
  search [options]              filtered listings
      --location <text>         city, state, address or title contains text
      --price-min <n>           --price-max <n>     (0 or less: no bound)
      --beds <n>                --baths <n>
      --type <type>             House, Condo, Townhouse or Apartment (repeatable)
  show <id>                     one listing
  map [--select <id>]           map view of all listings
  favorites                     favorited listings
  favorite <id>                 add a favorite
  unfavorite <id>               remove a favorite
  toggle-favorite <id>          add or remove a favorite
  is-favorite <id>              check a favorite
  inquire <id> --name <n> --email <e> [--phone <p>] [--message <m>]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Search(SearchFilters),
    Show(String),
    Map { select: Option<String> },
    Favorites,
    Favorite(String),
    Unfavorite(String),
    ToggleFavorite(String),
    IsFavorite(String),
    Inquire {
        id: String,
        name: String,
        email: String,
        phone: String,
        message: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub json: bool,
}

impl Invocation {
    /// Parse arguments, program name excluded.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let mut json = false;
        let mut help = false;
        let mut rest: Vec<&str> = Vec::with_capacity(args.len());
        // Global flags only count where they cannot be the value of `--option`
        let mut expects_value = false;
        for arg in args {
            let arg = arg.as_ref();
            if !expects_value {
                match arg {
                    "--json" => {
                        json = true;
                        continue;
                    }
                    "--help" | "-h" => {
                        help = true;
                        continue;
                    }
                    _ => {}
                }
            }
            expects_value = !expects_value && arg.starts_with("--");
            rest.push(arg);
        }

        if help || rest.is_empty() {
            return Ok(Self {
                command: Command::Help,
                json,
            });
        }

        let (name, tail) = rest.split_first().ok_or_else(|| anyhow!("missing command"))?;
        let command = match *name {
            "list" => no_args(Command::List, tail)?,
            "map" => parse_map(tail)?,
            "favorites" => no_args(Command::Favorites, tail)?,
            "search" => Command::Search(parse_filters(tail)?),
            "show" => Command::Show(single_id(name, tail)?),
            "favorite" => Command::Favorite(single_id(name, tail)?),
            "unfavorite" => Command::Unfavorite(single_id(name, tail)?),
            "toggle-favorite" => Command::ToggleFavorite(single_id(name, tail)?),
            "is-favorite" => Command::IsFavorite(single_id(name, tail)?),
            "inquire" => parse_inquiry(tail)?,
            other => bail!("unknown command '{}'", other),
        };

        Ok(Self { command, json })
    }
}

fn no_args(command: Command, tail: &[&str]) -> Result<Command> {
    if let Some(extra) = tail.first() {
        bail!("unexpected argument '{}'", extra);
    }
    Ok(command)
}

fn single_id(name: &str, tail: &[&str]) -> Result<String> {
    match tail {
        [id] => Ok(id.to_string()),
        _ => bail!("'{}' takes exactly one listing id", name),
    }
}

/// Walk `--flag value` pairs.
fn flag_pairs<'a>(tail: &[&'a str]) -> Result<Vec<(&'a str, &'a str)>> {
    let mut pairs = Vec::with_capacity(tail.len() / 2);
    let mut iter = tail.iter();
    while let Some(flag) = iter.next() {
        if !flag.starts_with("--") {
            bail!("unexpected argument '{}'", flag);
        }
        let value = iter
            .next()
            .ok_or_else(|| anyhow!("{} needs a value", flag))?;
        pairs.push((*flag, *value));
    }
    Ok(pairs)
}

fn parse_filters(tail: &[&str]) -> Result<SearchFilters> {
    let mut filters = SearchFilters::default();
    for (flag, value) in flag_pairs(tail)? {
        match flag {
            "--location" => filters.location = value.to_string(),
            "--price-min" => filters.price_min = parse_bound(flag, value)?,
            "--price-max" => filters.price_max = parse_bound(flag, value)?,
            "--beds" => filters.bedrooms_min = parse_bound(flag, value)?,
            "--baths" => filters.bathrooms_min = parse_bound(flag, value)?,
            "--type" => {
                let kind: PropertyType = value.parse()?;
                if !filters.property_type.contains(&kind) {
                    filters.property_type.push(kind);
                }
            }
            other => bail!("unknown search option '{}'", other),
        }
    }
    Ok(filters)
}

/// Whole-number bound; zero or negative switches the bound off.
fn parse_bound<T: TryFrom<i64> + Default>(flag: &str, value: &str) -> Result<T> {
    let raw: i64 = value
        .trim()
        .parse()
        .map_err(|_| anyhow!("{} expects a whole number, got '{}'", flag, value))?;
    neutral_bound(raw).ok_or_else(|| anyhow!("{} is out of range: {}", flag, value))
}

fn parse_map(tail: &[&str]) -> Result<Command> {
    let mut select = None;
    for (flag, value) in flag_pairs(tail)? {
        match flag {
            "--select" => select = Some(value.to_string()),
            other => bail!("unknown map option '{}'", other),
        }
    }
    Ok(Command::Map { select })
}

fn parse_inquiry(tail: &[&str]) -> Result<Command> {
    let (id, options) = tail
        .split_first()
        .ok_or_else(|| anyhow!("'inquire' needs a listing id"))?;

    let (mut name, mut email, mut phone, mut message) = (None, None, String::new(), None);
    for (flag, value) in flag_pairs(options)? {
        match flag {
            "--name" => name = Some(value.to_string()),
            "--email" => email = Some(value.to_string()),
            "--phone" => phone = value.to_string(),
            "--message" => message = Some(value.to_string()),
            other => bail!("unknown inquiry option '{}'", other),
        }
    }

    Ok(Command::Inquire {
        id: id.to_string(),
        name: name.unwrap_or_default(),
        email: email.unwrap_or_default(),
        phone,
        message,
    })
}

/// Execute one command and render its output.
pub async fn run(app: &App, invocation: &Invocation) -> Result<String> {
    let json = invocation.json;
    match &invocation.command {
        Command::Help => Ok(USAGE.to_string()),
        Command::List => {
            let listings = app.properties.get_all().await;
            render(json, &listings, |out| render_listings(out, &listings, "properties"))
        }
        Command::Search(filters) => {
            let listings = app.properties.search(filters).await;
            let noun = if filters.is_neutral() {
                "properties"
            } else {
                "properties match your filters"
            };
            render(json, &listings, |out| render_listings(out, &listings, noun))
        }
        Command::Show(raw) => {
            let listing = app.properties.get_by_raw_id(raw).await?;
            let favorite = app.favorites.is_favorite(listing.id).await;
            render(json, &listing, |out| render_detail(out, &listing, favorite))
        }
        Command::Map { select } => {
            let listings = app.properties.get_all().await;
            let mut map = MapView::new(&listings);
            if let Some(raw) = select {
                let found = parse_id(raw).map(|id| map.select(id)).unwrap_or(false);
                if !found {
                    return Err(StoreError::property_not_found(raw).into());
                }
            }
            render(json, &map, |out| render_map(out, &map, &listings))
        }
        Command::Favorites => {
            let listings = app.favorites.get_favorite_properties().await;
            render(json, &listings, |out| render_listings(out, &listings, "favorites"))
        }
        Command::Favorite(raw) => {
            let favorite = app.favorites.add_raw(raw).await?;
            render(json, &favorite, |out| {
                writeln!(out, "Added to favorites (property {})", favorite.property_id)
            })
        }
        Command::Unfavorite(raw) => {
            let favorite = app.favorites.remove_raw(raw).await?;
            render(json, &favorite, |out| {
                writeln!(out, "Removed from favorites (property {})", favorite.property_id)
            })
        }
        Command::ToggleFavorite(raw) => {
            let listing = app.properties.get_by_raw_id(raw).await?;
            let toggled = app.favorites.toggle(listing.id).await?;
            let (verb, favorite) = match &toggled {
                Toggled::Added(f) => ("Added to", f),
                Toggled::Removed(f) => ("Removed from", f),
            };
            render(json, favorite, |out| {
                writeln!(out, "{} favorites (property {})", verb, favorite.property_id)
            })
        }
        Command::IsFavorite(raw) => {
            let favorite = app.favorites.is_favorite_raw(raw).await;
            render(json, &favorite, |out| writeln!(out, "{}", favorite))
        }
        Command::Inquire {
            id,
            name,
            email,
            phone,
            message,
        } => {
            let listing = app.properties.get_by_raw_id(id).await?;
            let mut draft = InquiryDraft::for_listing(&listing);
            draft.name = name.clone();
            draft.email = email.clone();
            draft.phone = phone.clone();
            if let Some(message) = message {
                draft.message = message.clone();
            }
            let receipt = app
                .inquiries
                .submit(&mut draft, &listing)
                .await
                .context("Inquiry not sent")?;
            render(json, &receipt, |out| {
                writeln!(
                    out,
                    "Your inquiry about \"{}\" has been sent. We'll contact you at {}.",
                    listing.title, receipt.email
                )
            })
        }
    }
}

fn render<T: Serialize>(
    json: bool,
    value: &T,
    text: impl FnOnce(&mut String) -> std::fmt::Result,
) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(value)?);
    }
    let mut out = String::new();
    text(&mut out)?;
    Ok(out.trim_end().to_string())
}

fn render_listings(out: &mut String, listings: &[Listing], noun: &str) -> std::fmt::Result {
    if listings.is_empty() {
        return writeln!(out, "No properties found");
    }
    writeln!(out, "{} {}", listings.len(), noun)?;
    for listing in listings {
        writeln!(out, "{:>3}. {}", listing.id, listing.summary())?;
        writeln!(
            out,
            "     {} bd, {} ba, {} sq ft, {}",
            listing.bedrooms,
            listing.bathrooms,
            format_thousands(u64::from(listing.square_feet)),
            listing.property_type
        )?;
    }
    Ok(())
}

fn render_detail(out: &mut String, listing: &Listing, favorite: bool) -> std::fmt::Result {
    let heart = if favorite { " [favorite]" } else { "" };
    writeln!(out, "{}{}", listing.title, heart)?;
    writeln!(out, "{}", format_price(listing.price))?;
    writeln!(out, "{}", listing.address.full)?;
    writeln!(out)?;
    for stat in listing.stats() {
        writeln!(out, "  {:<14} {}", stat.label, stat.value)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", listing.description)?;
    if !listing.amenities.is_empty() {
        writeln!(out, "Amenities: {}", listing.amenities.join(", "))?;
    }
    writeln!(out, "Listed {}", format_long_date(listing.listing_date))?;
    writeln!(out, "{} photo(s)", listing.images.len())
}

fn render_map(out: &mut String, map: &MapView, listings: &[Listing]) -> std::fmt::Result {
    writeln!(
        out,
        "Map center ({:.4}, {:.4}), zoom {}",
        map.center.lat, map.center.lng, map.zoom
    )?;
    for (marker, listing) in map.markers.iter().zip(listings) {
        let cursor = if marker.selected { '>' } else { ' ' };
        writeln!(
            out,
            "{} [{:>4},{:>4}] {:<6} {}",
            cursor, marker.x, marker.y, marker.label, listing.title
        )?;
    }
    Ok(())
}
