use crate::entities::{Aisle, Instance, ItemQtys, Order, Selection};
use crate::io::ParseError;
use anyhow::{Context, Result};
use itertools::Itertools;
use log::debug;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Reads and parses an instance file, naming the instance after the file stem.
pub fn read_instance(path: &Path) -> Result<Instance> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read instance file: {}", path.display()))?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let instance = parse_instance(&name, &text)
        .with_context(|| format!("could not parse instance file: {}", path.display()))?;
    debug!(
        "[IO] read instance {}: {} orders, {} aisles, {} items",
        instance.name,
        instance.n_orders(),
        instance.n_aisles(),
        instance.n_items
    );
    Ok(instance)
}

/// Reads and parses a solution file.
pub fn read_selection(path: &Path) -> Result<Selection> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read solution file: {}", path.display()))?;
    parse_selection(&text)
        .with_context(|| format!("could not parse solution file: {}", path.display()))
}

/// Parses the whitespace-delimited instance format:
///
/// ```text
/// n_orders n_items n_aisles
/// d item_1 qty_1 ... item_d qty_d     (n_orders lines)
/// d item_1 qty_1 ... item_d qty_d     (n_aisles lines)
/// wave_lb wave_ub
/// ```
///
/// Blank lines are ignored.
pub fn parse_instance(name: &str, text: &str) -> Result<Instance, ParseError> {
    let mut lines = LineReader::new(text);

    let (line, header) = lines.next_line("instance header")?;
    expect_len(line, &header, 3)?;
    let n_orders: usize = parse_token(line, header[0], "order count")?;
    let n_items: usize = parse_token(line, header[1], "item count")?;
    let n_aisles: usize = parse_token(line, header[2], "aisle count")?;

    let orders = (0..n_orders)
        .map(|id| {
            let (line, tokens) = lines.next_line("order line")?;
            Ok(Order::new(id, parse_item_qtys(line, &tokens, n_items)?))
        })
        .collect::<Result<Vec<Order>, ParseError>>()?;

    let aisles = (0..n_aisles)
        .map(|id| {
            let (line, tokens) = lines.next_line("aisle line")?;
            Ok(Aisle::new(id, parse_item_qtys(line, &tokens, n_items)?))
        })
        .collect::<Result<Vec<Aisle>, ParseError>>()?;

    let (line, bounds) = lines.next_line("wave bounds")?;
    expect_len(line, &bounds, 2)?;
    let wave_lb: u64 = parse_token(line, bounds[0], "wave lower bound")?;
    let wave_ub: u64 = parse_token(line, bounds[1], "wave upper bound")?;
    if wave_lb > wave_ub {
        return Err(ParseError::InvalidWaveBounds {
            line,
            lb: wave_lb,
            ub: wave_ub,
        });
    }

    if let Some(line) = lines.peek_line() {
        return Err(ParseError::TrailingContent { line });
    }

    // every demand and supply sum over a subset of lines must fit in a u64
    let total_ok = orders
        .iter()
        .map(|o| o.total_units)
        .chain(aisles.iter().map(|a| a.supply.total()))
        .try_fold(0u64, |acc, units| acc.checked_add(units))
        .is_some();
    if !total_ok {
        return Err(ParseError::QuantityOverflow { line });
    }

    Ok(Instance::new(name, orders, aisles, n_items, wave_lb, wave_ub))
}

/// Parses the solution format: the number of selected orders followed by one order index per line,
/// then the number of visited aisles followed by one aisle index per line.
///
/// Duplicate indices are accepted and collapse into a single one.
pub fn parse_selection(text: &str) -> Result<Selection, ParseError> {
    let mut tokens = text
        .lines()
        .enumerate()
        .flat_map(|(i, l)| l.split_whitespace().map(move |t| (i + 1, t)))
        .peekable();

    let mut read_indices = |count_name: &'static str,
                            index_name: &'static str|
     -> Result<Vec<usize>, ParseError> {
        let (line, token) = tokens.next().ok_or(ParseError::UnexpectedEof {
            expected: count_name,
        })?;
        let count: usize = parse_token(line, token, count_name)?;
        (0..count)
            .map(|_| {
                let (line, token) = tokens.next().ok_or(ParseError::UnexpectedEof {
                    expected: index_name,
                })?;
                parse_token(line, token, index_name)
            })
            .collect()
    };

    let orders = read_indices("order count", "order index")?;
    let aisles = read_indices("aisle count", "aisle index")?;

    if let Some((line, _)) = tokens.peek() {
        return Err(ParseError::TrailingContent { line: *line });
    }

    Ok(Selection::new(orders, aisles))
}

fn parse_item_qtys(line: usize, tokens: &[&str], n_items: usize) -> Result<ItemQtys, ParseError> {
    let d: usize = parse_token(line, tokens.first().copied().unwrap_or(""), "pair count")?;
    let expected = d.checked_mul(2).and_then(|n| n.checked_add(1));
    match expected {
        Some(expected) => expect_len(line, tokens, expected)?,
        None => {
            return Err(ParseError::TokenCount {
                line,
                expected: usize::MAX,
                found: tokens.len(),
            });
        }
    }

    let entries = tokens[1..]
        .iter()
        .tuples()
        .map(|(item, qty)| {
            let item: usize = parse_token(line, item, "item id")?;
            let qty: u64 = parse_token(line, qty, "quantity")?;
            if item >= n_items {
                return Err(ParseError::ItemOutOfRange {
                    line,
                    item,
                    n_items,
                });
            }
            if qty == 0 {
                return Err(ParseError::ZeroQuantity { line, item });
            }
            Ok((item, qty))
        })
        .collect::<Result<Vec<(usize, u64)>, ParseError>>()?;

    if let Some(item) = entries.iter().map(|(item, _)| *item).duplicates().next() {
        return Err(ParseError::DuplicateItem { line, item });
    }
    if entries
        .iter()
        .try_fold(0u64, |acc, (_, qty)| acc.checked_add(*qty))
        .is_none()
    {
        return Err(ParseError::QuantityOverflow { line });
    }

    Ok(ItemQtys::new(entries))
}

fn parse_token<T: FromStr>(line: usize, token: &str, expected: &'static str) -> Result<T, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        token: token.to_string(),
        expected,
    })
}

fn expect_len(line: usize, tokens: &[&str], expected: usize) -> Result<(), ParseError> {
    match tokens.len() == expected {
        true => Ok(()),
        false => Err(ParseError::TokenCount {
            line,
            expected,
            found: tokens.len(),
        }),
    }
}

/// Iterates over the non-blank lines of a text, splitting each into tokens
struct LineReader<'a> {
    lines: std::iter::Peekable<Box<dyn Iterator<Item = (usize, &'a str)> + 'a>>,
}

impl<'a> LineReader<'a> {
    fn new(text: &'a str) -> Self {
        let lines: Box<dyn Iterator<Item = (usize, &'a str)> + 'a> = Box::new(
            text.lines()
                .enumerate()
                .map(|(i, l)| (i + 1, l))
                .filter(|(_, l)| !l.trim().is_empty()),
        );
        Self {
            lines: lines.peekable(),
        }
    }

    fn next_line(&mut self, expected: &'static str) -> Result<(usize, Vec<&'a str>), ParseError> {
        self.lines
            .next()
            .map(|(line, l)| (line, l.split_whitespace().collect()))
            .ok_or(ParseError::UnexpectedEof { expected })
    }

    fn peek_line(&mut self) -> Option<usize> {
        self.lines.peek().map(|(line, _)| *line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const SCENARIO: &str = "2 2 2\n1 0 3\n2 0 2 1 2\n1 0 5\n1 1 2\n2 5\n";

    #[test]
    fn parses_scenario() {
        let instance = parse_instance("scenario", SCENARIO).unwrap();

        assert_eq!(instance.n_orders(), 2);
        assert_eq!(instance.n_aisles(), 2);
        assert_eq!(instance.n_items, 2);
        assert_eq!(instance.order(1).total_units, 4);
        assert_eq!(instance.order(1).demand.get(1), 2);
        assert_eq!(instance.aisle(0).supply.get(0), 5);
        assert_eq!((instance.wave_lb, instance.wave_ub), (2, 5));
    }

    #[test]
    fn tolerates_blank_lines_and_extra_whitespace() {
        let text = "\n2   2 2\n1 0 3\n\n2 0 2  1 2\n1 0 5\n1 1 2\n  2 5  \n\n";
        let instance = parse_instance("spaced", text).unwrap();
        assert_eq!(instance.total_demand_units(), 7);
    }

    #[test]
    fn huge_declared_item_count_is_indexable() {
        let instance = parse_instance("wide", "0 1000000000000000000 0\n0 0\n").unwrap();
        let index = crate::entities::IncidenceIndex::new(&instance);

        assert_eq!(instance.n_items, 1_000_000_000_000_000_000);
        assert_eq!(index.demanded_items().count(), 0);
    }

    #[test]
    fn empty_orders_are_allowed() {
        let instance = parse_instance("empty", "1 1 1\n0\n1 0 4\n0 0\n").unwrap();
        assert_eq!(instance.order(0).total_units, 0);
        assert!(instance.order(0).demand.is_empty());
    }

    #[test_case("2 2 2\n1 0 3\n2 0 2 1\n1 0 5\n1 1 2\n2 5\n", ParseError::TokenCount { line: 3, expected: 5, found: 4 }; "short order line")]
    #[test_case("2 2 2\n1 0 3\n2 0 2 1 2\n1 0 5\n1 1 2\n", ParseError::UnexpectedEof { expected: "wave bounds" }; "missing bounds")]
    #[test_case("2 2 2\n1 0 x\n2 0 2 1 2\n1 0 5\n1 1 2\n2 5\n", ParseError::InvalidNumber { line: 2, token: "x".into(), expected: "quantity" }; "non numeric")]
    #[test_case("2 2 2\n1 0 3\n2 0 2 7 2\n1 0 5\n1 1 2\n2 5\n", ParseError::ItemOutOfRange { line: 3, item: 7, n_items: 2 }; "item out of range")]
    #[test_case("2 2 2\n1 0 3\n2 0 2 0 2\n1 0 5\n1 1 2\n2 5\n", ParseError::DuplicateItem { line: 3, item: 0 }; "duplicate item")]
    #[test_case("2 2 2\n1 0 0\n2 0 2 1 2\n1 0 5\n1 1 2\n2 5\n", ParseError::ZeroQuantity { line: 2, item: 0 }; "zero quantity")]
    #[test_case("2 2 2\n1 0 3\n2 0 2 1 2\n1 0 5\n1 1 2\n6 5\n", ParseError::InvalidWaveBounds { line: 6, lb: 6, ub: 5 }; "inverted bounds")]
    #[test_case("2 2 2\n1 0 3\n2 0 2 1 2\n1 0 5\n1 1 2\n2 5\n1 2\n", ParseError::TrailingContent { line: 7 }; "trailing line")]
    #[test_case("2 2\n", ParseError::TokenCount { line: 1, expected: 3, found: 2 }; "short header")]
    #[test_case("1 1 1\n9223372036854775808\n1 0 4\n0 4\n", ParseError::TokenCount { line: 2, expected: usize::MAX, found: 1 }; "pair count overflows")]
    #[test_case("1 2 1\n2 0 18446744073709551615 1 1\n1 0 4\n0 4\n", ParseError::QuantityOverflow { line: 2 }; "order quantities overflow")]
    #[test_case("2 1 1\n1 0 18446744073709551615\n1 0 1\n1 0 4\n0 4\n", ParseError::QuantityOverflow { line: 5 }; "instance quantities overflow")]
    fn rejects_malformed_instances(text: &str, expected: ParseError) {
        assert_eq!(parse_instance("bad", text).unwrap_err(), expected);
    }

    #[test]
    fn parses_selection_with_duplicates() {
        let selection = parse_selection("3\n0\n2\n0\n2\n1\n1\n").unwrap();
        assert_eq!(selection, Selection::new([0, 2], [1]));
    }

    #[test]
    fn parses_selection_without_aisles() {
        let selection = parse_selection("1\n4\n0\n").unwrap();
        assert_eq!(selection, Selection::new([4], []));
    }

    #[test_case("2\n0\n", ParseError::UnexpectedEof { expected: "order index" }; "truncated orders")]
    #[test_case("1\n0\n", ParseError::UnexpectedEof { expected: "aisle count" }; "missing aisles")]
    #[test_case("1\n0\n1\n-3\n", ParseError::InvalidNumber { line: 4, token: "-3".into(), expected: "aisle index" }; "negative index")]
    #[test_case("0\n0\n5\n", ParseError::TrailingContent { line: 3 }; "trailing index")]
    fn rejects_malformed_selections(text: &str, expected: ParseError) {
        assert_eq!(parse_selection(text).unwrap_err(), expected);
    }
}
