//! LP-format export of a constraint set.
//!
//! The persisted output contract is a human-readable
//! `Subject To / Bounds / Generals / End` block: one constraint per line as
//! a coefficient·variable sum bounded by the limiting value, followed by
//! per-variable domain bounds. Variables are numbered `x0..x(n-1)`; ball
//! terms render the variable as `x0^2`.
//!
//! Writing uses `{}` formatting for `f64`, which Rust guarantees to be the
//! shortest representation that parses back to the identical value — the
//! round trip through [`parse_lp`] is exact.

use crate::geometry::{Constraint, Domain};
use std::fmt::Write;

/// Renders `constraints` and `domains` as an LP-format block.
///
/// # Examples
///
/// ```
/// use constraint_es::export::write_lp;
/// use constraint_es::geometry::{Constraint, Domain};
///
/// let text = write_lp(
///     &[Constraint::linear(vec![1.0, 2.0], 5.0)],
///     &[Domain::new(-3.0, 3.0), Domain::new(-3.0, 3.0)],
/// );
/// assert!(text.contains("c0: 1 x0 + 2 x1 <= 5"));
/// assert!(text.ends_with("End\n"));
/// ```
pub fn write_lp(constraints: &[Constraint], domains: &[Domain]) -> String {
    let mut out = String::new();
    out.push_str("Subject To\n");
    for (i, constraint) in constraints.iter().enumerate() {
        let squared = matches!(constraint, Constraint::Ball { .. });
        let _ = write!(out, " c{i}:");
        for (j, &coeff) in constraint.coefficients().iter().enumerate() {
            let suffix = if squared { "^2" } else { "" };
            if j == 0 {
                let _ = write!(out, " {coeff} x{j}{suffix}");
            } else if coeff < 0.0 {
                let _ = write!(out, " - {} x{j}{suffix}", -coeff);
            } else {
                let _ = write!(out, " + {coeff} x{j}{suffix}");
            }
        }
        let _ = writeln!(out, " <= {}", constraint.limit());
    }
    out.push_str("Bounds\n");
    for (j, domain) in domains.iter().enumerate() {
        let _ = writeln!(out, " {} <= x{j} <= {}", domain.lower(), domain.upper());
    }
    out.push_str("Generals\nEnd\n");
    out
}

/// Parses an LP-format block written by [`write_lp`] back into constraints
/// and domains.
///
/// Coefficient values and constraint ordering are reconstructed exactly.
pub fn parse_lp(text: &str) -> Result<(Vec<Constraint>, Vec<Domain>), String> {
    #[derive(PartialEq)]
    enum Section {
        Preamble,
        Constraints,
        Bounds,
        Generals,
        Done,
    }

    // (terms, limit, squared); coefficient vectors are materialized once the
    // dimensionality is known from the Bounds section.
    let mut raw: Vec<(Vec<(usize, f64)>, f64, bool)> = Vec::new();
    let mut bounds: Vec<(f64, f64)> = Vec::new();
    let mut section = Section::Preamble;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line {
            "Subject To" => {
                section = Section::Constraints;
                continue;
            }
            "Bounds" => {
                section = Section::Bounds;
                continue;
            }
            "Generals" => {
                section = Section::Generals;
                continue;
            }
            "End" => {
                section = Section::Done;
                continue;
            }
            _ => {}
        }
        match section {
            Section::Constraints => raw.push(parse_constraint_line(line)?),
            Section::Bounds => bounds.push(parse_bounds_line(line)?),
            Section::Generals => {} // integer markers, none emitted
            Section::Preamble | Section::Done => {
                return Err(format!("unexpected line outside any section: {line:?}"))
            }
        }
    }
    if section != Section::Done {
        return Err("missing End marker".into());
    }

    let dimensions = bounds.len();
    let mut constraints = Vec::with_capacity(raw.len());
    for (terms, limit, squared) in raw {
        let mut coefficients = vec![0.0; dimensions];
        for (index, coeff) in terms {
            if index >= dimensions {
                return Err(format!(
                    "variable x{index} exceeds the {dimensions} bounded dimensions"
                ));
            }
            coefficients[index] = coeff;
        }
        constraints.push(if squared {
            Constraint::ball(coefficients, limit)
        } else {
            Constraint::linear(coefficients, limit)
        });
    }
    let domains = bounds
        .into_iter()
        .map(|(lo, hi)| Domain::new(lo, hi))
        .collect();
    Ok((constraints, domains))
}

/// Parses ` c0: 1 x0 + 2 x1 <= 5` (label optional).
fn parse_constraint_line(line: &str) -> Result<(Vec<(usize, f64)>, f64, bool), String> {
    let body = match line.split_once(':') {
        Some((_, rest)) => rest,
        None => line,
    };
    let tokens: Vec<&str> = body.split_whitespace().collect();
    let mut terms = Vec::new();
    let mut squared = false;
    let mut sign = 1.0;
    let mut iter = tokens.iter().peekable();
    while let Some(&token) = iter.next() {
        match token {
            "+" => sign = 1.0,
            "-" => sign = -1.0,
            "<=" => {
                let limit = iter
                    .next()
                    .ok_or_else(|| format!("missing limit in {line:?}"))?;
                let limit: f64 = limit
                    .parse()
                    .map_err(|_| format!("bad limit {limit:?} in {line:?}"))?;
                return Ok((terms, limit, squared));
            }
            number => {
                let coeff: f64 = number
                    .parse()
                    .map_err(|_| format!("bad coefficient {number:?} in {line:?}"))?;
                let var = iter
                    .next()
                    .ok_or_else(|| format!("dangling coefficient in {line:?}"))?;
                let (index, is_squared) = parse_variable(var)?;
                squared |= is_squared;
                terms.push((index, sign * coeff));
                sign = 1.0;
            }
        }
    }
    Err(format!("constraint line without <= relation: {line:?}"))
}

/// Parses ` -3 <= x0 <= 3`.
fn parse_bounds_line(line: &str) -> Result<(f64, f64), String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [lo, "<=", var, "<=", hi] => {
            parse_variable(var)?;
            let lo: f64 = lo.parse().map_err(|_| format!("bad bound {lo:?}"))?;
            let hi: f64 = hi.parse().map_err(|_| format!("bad bound {hi:?}"))?;
            Ok((lo, hi))
        }
        _ => Err(format!("malformed bounds line: {line:?}")),
    }
}

/// Parses `x3` or `x3^2` into the variable index and squared flag.
fn parse_variable(token: &str) -> Result<(usize, bool), String> {
    let (name, squared) = match token.strip_suffix("^2") {
        Some(name) => (name, true),
        None => (token, false),
    };
    let index = name
        .strip_prefix('x')
        .ok_or_else(|| format!("expected variable token, found {token:?}"))?
        .parse::<usize>()
        .map_err(|_| format!("bad variable index in {token:?}"))?;
    Ok((index, squared))
}
