//! Parsing of the board configuration given on the command line.
use board::Segment;

/// Parses a segment written as `OFFSET:SCALE`, for example `200:10`.
pub fn parse_segment(s: &str) -> Result<Segment, String> {
    let (offset, scale) = s
        .split_once(':')
        .ok_or_else(|| format!("segment '{s}' should have the form OFFSET:SCALE"))?;
    let offset: f64 = offset
        .trim()
        .parse()
        .map_err(|e| format!("invalid offset in segment '{s}': {e}"))?;
    let scale: f64 = scale
        .trim()
        .parse()
        .map_err(|e| format!("invalid scale in segment '{s}': {e}"))?;
    Ok(Segment::new(offset, scale))
}
