// Balance feed HTML parsing
use crate::model::{ParserError, RawTransaction};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

pub trait Parser {
    fn parse(&self, html: &str) -> Result<Vec<RawTransaction>, ParserError>;
}

const ITEM: &str = "li.movement";
const KIND: &str = ".movement-type";
const REASON: &str = ".movement-text";
const DATE: &str = ".movement-date";
const AMOUNT: &str = ".movement-amount";
const BALANCE: &str = ".movement-balance";

pub struct MisterParser {
    item: Selector,
    kind: Selector,
    reason: Selector,
    date: Selector,
    amount: Selector,
    balance: Selector,
}

impl MisterParser {
    pub fn new() -> Result<Self, ParserError> {
        Ok(Self {
            item: selector(ITEM)?,
            kind: selector(KIND)?,
            reason: selector(REASON)?,
            date: selector(DATE)?,
            amount: selector(AMOUNT)?,
            balance: selector(BALANCE)?,
        })
    }

    fn text_of(element: &ElementRef, sel: &Selector) -> Option<String> {
        element
            .select(sel)
            .next()
            .map(|node| node.text().collect::<String>())
            .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}

fn selector(css: &str) -> Result<Selector, ParserError> {
    Selector::parse(css).map_err(|_| ParserError::Selector(css.to_string()))
}

impl Parser for MisterParser {
    fn parse(&self, html: &str) -> Result<Vec<RawTransaction>, ParserError> {
        let document = Html::parse_document(html);
        let mut movements = Vec::new();

        for (position, element) in document.select(&self.item).enumerate() {
            let kind_label = Self::text_of(&element, &self.kind);
            let reason = Self::text_of(&element, &self.reason);

            let (Some(kind_label), Some(reason)) = (kind_label, reason) else {
                warn!("Skipping movement #{}: missing type or text", position);
                continue;
            };

            movements.push(RawTransaction {
                kind_label,
                reason,
                date: Self::text_of(&element, &self.date).unwrap_or_default(),
                amount: Self::text_of(&element, &self.amount).unwrap_or_default(),
                balance: Self::text_of(&element, &self.balance).unwrap_or_default(),
            });
        }

        if movements.is_empty() {
            return Err(ParserError::Empty);
        }

        debug!("Parsed {} movements", movements.len());
        Ok(movements)
    }
}
