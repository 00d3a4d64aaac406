//! Parsers for the comma-delimited catalog and ratings files.
//!
//! Both files carry a header row:
//! - `movies.csv`: movieId,title,genres
//! - `ratings.csv`: userId,movieId,rating,timestamp
//!
//! Titles may be quoted and contain commas ("American President, The
//! (1995)"), so lines are split with a small quote-aware field splitter
//! rather than a plain `split(',')`. The timestamp column of the ratings
//! file is parsed for shape but dropped.

use crate::error::{LoadError, Result};
use crate::types::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }
    Ok(lines)
}

/// Split one CSV line into fields, honoring double-quoted fields.
///
/// Handles the subset of RFC 4180 the MovieLens exports use: fields may be
/// wrapped in double quotes, and a doubled quote inside a quoted field is
/// an escaped quote.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    // Escaped quote
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn field<'a>(
    fields: &'a [String],
    idx: usize,
    file: &str,
    line_no: usize,
    name: &str,
) -> Result<&'a str> {
    fields
        .get(idx)
        .map(|s| s.as_str())
        .ok_or_else(|| LoadError::Parse {
            file: file.to_string(),
            line: line_no,
            reason: format!("Missing {}", name),
        })
}

/// Parse the movie catalog file (movieId,title,genres).
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let lines = read_lines(path)?;
    let mut lines_iter = lines.iter().enumerate();

    // Header row is required; its presence is how we tell a catalog file
    // from arbitrary CSV.
    match lines_iter.next() {
        Some((_, header)) if header.to_lowercase().starts_with("movieid") => {}
        _ => {
            return Err(LoadError::MissingHeader {
                file: "movies.csv".to_string(),
            });
        }
    }

    let mut movies = Vec::new();
    for (idx, line) in lines_iter {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let fields = split_fields(line_trimmed);
        let movie_id = field(&fields, 0, "movies.csv", line_no, "movieId")?;
        let title = field(&fields, 1, "movies.csv", line_no, "title")?;
        let genres = field(&fields, 2, "movies.csv", line_no, "genres")?;

        let movie = Movie {
            id: movie_id.parse().map_err(|e| LoadError::Parse {
                file: "movies.csv".to_string(),
                line: line_no,
                reason: format!("Invalid movieId: {}", e),
            })?,
            title: title.to_string(),
            genres: parse_genres(genres),
        };
        movies.push(movie);
    }
    Ok(movies)
}

/// Parse the ratings file (userId,movieId,rating,timestamp).
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    let lines = read_lines(path)?;
    let mut lines_iter = lines.iter().enumerate();

    match lines_iter.next() {
        Some((_, header)) if header.to_lowercase().starts_with("userid") => {}
        _ => {
            return Err(LoadError::MissingHeader {
                file: "ratings.csv".to_string(),
            });
        }
    }

    let mut ratings = Vec::new();
    for (idx, line) in lines_iter {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let fields = split_fields(line_trimmed);
        let user_id = field(&fields, 0, "ratings.csv", line_no, "userId")?;
        let movie_id = field(&fields, 1, "ratings.csv", line_no, "movieId")?;
        let rating_value = field(&fields, 2, "ratings.csv", line_no, "rating")?;
        // Timestamp column is present in the file but intentionally dropped.

        let rating = Rating {
            user_id: user_id.parse().map_err(|e| LoadError::Parse {
                file: "ratings.csv".to_string(),
                line: line_no,
                reason: format!("Invalid userId: {}", e),
            })?,
            movie_id: movie_id.parse().map_err(|e| LoadError::Parse {
                file: "ratings.csv".to_string(),
                line: line_no,
                reason: format!("Invalid movieId: {}", e),
            })?,
            rating: rating_value.parse().map_err(|e| LoadError::Parse {
                file: "ratings.csv".to_string(),
                line: line_no,
                reason: format!("Invalid rating: {}", e),
            })?,
        };

        if !(0.0..=5.0).contains(&rating.rating) {
            return Err(LoadError::InvalidValue {
                field: "rating".to_string(),
                value: rating.rating.to_string(),
            });
        }
        ratings.push(rating);
    }
    Ok(ratings)
}

/// Parse pipe-separated genre labels.
///
/// "(no genres listed)" is the catalog's marker for an unlabeled movie and
/// maps to an empty list.
fn parse_genres(s: &str) -> Vec<String> {
    if s.is_empty() || s == "(no genres listed)" {
        return Vec::new();
    }
    s.split('|').map(|g| g.to_string()).collect()
}
