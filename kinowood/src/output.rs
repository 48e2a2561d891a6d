//! Plain-text and JSON rendering of client results.

use anyhow::Result;
use kinowood_client::{CatalogPage, DetailPayload, PlaybackSession};
use serde_json::json;

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

pub fn print_catalog(page: &CatalogPage, api_base: &str, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }

    if page.is_empty() {
        println!("No movies found");
        return Ok(());
    }

    for movie in &page.movies {
        println!(
            "{:>8}  {} ({})",
            movie.id,
            or_na(movie.title.as_deref()),
            or_na(movie.year.as_deref())
        );
        if let Some(url) = movie.poster_url(api_base).or_else(|| movie.image_url(api_base)) {
            println!("          {url}");
        }
    }

    let pagination = page.pagination;
    if let (Some(current), Some(total)) = (pagination.current_page, pagination.total_pages) {
        println!("Page {current} of {total}");
    }
    println!("{} movies", page.len());
    Ok(())
}

pub fn print_detail(
    detail: &DetailPayload,
    session: &PlaybackSession,
    api_base: &str,
    as_json: bool,
) -> Result<()> {
    if as_json {
        let value = json!({
            "film": detail.film,
            "similar": detail.similar,
            "playback": session.state(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let film = &detail.film;
    println!("{}", or_na(film.title.as_deref()));
    println!("Original title: {}", or_na(film.original_title.as_deref()));
    println!("Year: {}", or_na(film.year.as_deref()));
    println!("Director: {}", or_na(film.director.as_deref()));
    println!("Writer: {}", or_na(film.writer.as_deref()));
    println!("Actors: {}", or_na(film.actors.as_deref()));
    println!("Genres: {}", or_na(film.genres.as_deref()));
    println!("Duration: {}", or_na(film.duration.as_deref()));
    if let Some(poster) = film.poster_url(api_base) {
        println!("Poster: {poster}");
    }
    if let Some(description) = film.description.as_deref() {
        println!();
        println!("{description}");
    }

    println!();
    let qualities: Vec<_> = session.qualities().collect();
    if qualities.is_empty() {
        println!("No video available");
    } else {
        println!("Qualities: {}", qualities.join(", "));
    }
    match (session.current_quality(), session.current_url()) {
        (Some(quality), Some(url)) => println!("Playing {quality}: {url}"),
        _ => println!("No playable stream"),
    }

    if !detail.similar.is_empty() {
        println!();
        println!("Similar:");
        for movie in &detail.similar {
            println!("  {:>8}  {}", movie.id, or_na(movie.title.as_deref()));
        }
    }
    Ok(())
}
