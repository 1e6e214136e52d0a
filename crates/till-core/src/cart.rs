//! # Cart Engine
//!
//! Owns the in-memory transaction: an ordered list of lines keyed by item id.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operator Action          Cart Method             State Change          │
//! │  ───────────────          ───────────             ────────────          │
//! │                                                                         │
//! │  Click item card ────────► add_item() ──────────► push or qty += 1     │
//! │                                                                         │
//! │  Click + / - ────────────► adjust_quantity() ───► qty += delta         │
//! │                                                    (qty ≤ 0 → remove)   │
//! │                                                                         │
//! │  Click remove ───────────► remove_item() ───────► lines.retain(..)     │
//! │                                                                         │
//! │  Clear ──────────────────► clear() ─────────────► lines.clear()        │
//! │                                                                         │
//! │  Bill created ───────────► settle() ────────────► qty -= billed qty    │
//! │                                                                         │
//! │  Render ─────────────────► snapshot() ──────────► (read only copy)     │
//! │                                                                         │
//! │  Every mutation notifies subscribed CartListeners with a snapshot.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per item id
//! - Every line has quantity ≥ 1
//! - A line's subtotal is always `quantity × unit_price`; it is computed,
//!   never stored, so it cannot drift
//! - The total is always the sum of line subtotals, recomputed on demand
//! - No line exceeds [`MAX_LINE_QUANTITY`], and every subtotal and the total
//!   fit in `i64` cents; a mutation that would break this is refused

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{BillLine, CatalogItem, ItemId};

/// Largest quantity a single line may hold.
pub const MAX_LINE_QUANTITY: i64 = 1_000_000;

// =============================================================================
// Change Notifications
// =============================================================================

/// Receives a snapshot after every cart mutation.
///
/// The presentation layer implements this to re-render the cart panel. The
/// listener runs synchronously inside the mutation; it must not call back
/// into the cart.
pub trait CartListener: Send + Sync {
    fn on_cart_changed(&self, snapshot: &CartSnapshot);
}

/// What a mutation did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    /// A new line was appended with quantity 1.
    Added,
    /// An existing line's quantity went up by one.
    Incremented { quantity: i64 },
    /// An existing line's quantity was adjusted and is still positive.
    Updated { quantity: i64 },
    /// The line is gone (explicit removal or quantity reached zero).
    Removed,
    /// Every line was dropped.
    Cleared,
    /// Billed quantities were taken off; `remaining` lines are left.
    Settled { remaining: usize },
    /// The change would push a quantity or amount out of range; the cart is
    /// untouched.
    Refused,
    /// Nothing matched; the cart is untouched.
    Unchanged,
}

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the cart.
///
/// ## Snapshot Pattern
/// `name` and `unit_price` are copied from the catalog when the line is
/// created. Later catalog renames or price changes never reach an existing
/// line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    item_id: ItemId,
    name: String,
    unit_price: Money,
    quantity: i64,
}

impl CartLine {
    fn from_item(item: &CatalogItem) -> Self {
        CartLine {
            item_id: item.id,
            name: item.name.clone(),
            unit_price: item.price,
            quantity: 1,
        }
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Line subtotal, always `quantity × unit_price`.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The transaction being built.
///
/// Created empty at session start, never persisted.
#[derive(Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    listeners: Vec<Arc<dyn CartListener>>,
}

impl fmt::Debug for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cart")
            .field("lines", &self.lines)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Registers a listener for change notifications.
    pub fn subscribe(&mut self, listener: Arc<dyn CartListener>) {
        self.listeners.push(listener);
    }

    /// Adds one unit of `item`.
    ///
    /// ## Behavior
    /// - Item already in cart: quantity goes up by one, unit price stays
    ///   the one captured when the line was created
    /// - Item not in cart: a new line with quantity 1 is appended
    ///
    /// Refused without notification when the line would pass
    /// [`MAX_LINE_QUANTITY`] or the total would leave the `i64` cent range.
    pub fn add_item(&mut self, item: &CatalogItem) -> LineChange {
        let index = self.position(item.id);
        let (unit_price, quantity) = match index {
            Some(index) => (self.lines[index].unit_price, self.lines[index].quantity + 1),
            None => (item.price, 1),
        };
        if !self.fits(index, unit_price, quantity) {
            warn!(item_id = item.id, quantity, "add_item refused: line out of range");
            return LineChange::Refused;
        }

        let change = match index {
            Some(index) => {
                self.lines[index].quantity = quantity;
                LineChange::Incremented { quantity }
            }
            None => {
                self.lines.push(CartLine::from_item(item));
                LineChange::Added
            }
        };

        debug!(item_id = item.id, ?change, "add_item");
        self.notify();
        change
    }

    /// Deletes the line for `item_id`. Absent ids are a no-op, not an error.
    pub fn remove_item(&mut self, item_id: ItemId) -> LineChange {
        let before = self.lines.len();
        self.lines.retain(|line| line.item_id != item_id);

        let change = if self.lines.len() == before {
            LineChange::Unchanged
        } else {
            LineChange::Removed
        };

        debug!(item_id, ?change, "remove_item");
        self.notify();
        change
    }

    /// Adds `delta` to the quantity of the line for `item_id`.
    ///
    /// ## Behavior
    /// - Absent id: no-op, no notification
    /// - Resulting quantity ≤ 0: the line is removed, exactly like
    ///   [`Cart::remove_item`]; any negative delta past zero is absorbed
    /// - Resulting quantity above [`MAX_LINE_QUANTITY`], or a total out of
    ///   the `i64` cent range: refused, no notification
    /// - Otherwise: quantity updated
    pub fn adjust_quantity(&mut self, item_id: ItemId, delta: i64) -> LineChange {
        let Some(index) = self.position(item_id) else {
            debug!(item_id, delta, "adjust_quantity on absent line ignored");
            return LineChange::Unchanged;
        };

        let unit_price = self.lines[index].unit_price;
        let quantity = self.lines[index].quantity.saturating_add(delta);
        let change = if quantity <= 0 {
            self.lines.remove(index);
            LineChange::Removed
        } else if !self.fits(Some(index), unit_price, quantity) {
            warn!(item_id, delta, "adjust_quantity refused: line out of range");
            return LineChange::Refused;
        } else {
            self.lines[index].quantity = quantity;
            LineChange::Updated { quantity }
        };

        debug!(item_id, delta, ?change, "adjust_quantity");
        self.notify();
        change
    }

    /// Empties the cart unconditionally.
    pub fn clear(&mut self) -> LineChange {
        let dropped = self.lines.len();
        self.lines.clear();
        debug!(dropped, "cart cleared");
        self.notify();
        LineChange::Cleared
    }

    /// Takes a billed snapshot off the cart once the bill exists.
    ///
    /// ## Behavior
    /// - Cart still equal to `billed`: cleared, exactly like [`Cart::clear`]
    /// - Cart changed since `billed` was taken: each billed line's quantity
    ///   is subtracted from the matching line, lines reaching zero are
    ///   removed, and everything added meanwhile stays
    ///
    /// Notifies once.
    pub fn settle(&mut self, billed: &CartSnapshot) -> LineChange {
        if self.snapshot() == *billed {
            return self.clear();
        }

        for billed_line in &billed.lines {
            if let Some(index) = self.position(billed_line.item_id) {
                let line = &mut self.lines[index];
                line.quantity = line.quantity.saturating_sub(billed_line.quantity);
            }
        }
        self.lines.retain(|line| line.quantity > 0);

        let change = if self.lines.is_empty() {
            LineChange::Cleared
        } else {
            LineChange::Settled {
                remaining: self.lines.len(),
            }
        };
        debug!(billed_lines = billed.lines.len(), ?change, "settle");
        self.notify();
        change
    }

    /// Returns a detached copy of the cart for rendering or billing.
    ///
    /// Mutating the snapshot never affects the cart.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::from(self)
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines (unique items).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up the line for `item_id`.
    pub fn line(&self, item_id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item_id == item_id)
    }

    /// Sum of all line subtotals.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    fn position(&self, item_id: ItemId) -> Option<usize> {
        self.lines.iter().position(|line| line.item_id == item_id)
    }

    /// Whether the line at `index` (or a new one when `None`) may hold
    /// `quantity` units at `unit_price` with the total still in range.
    fn fits(&self, index: Option<usize>, unit_price: Money, quantity: i64) -> bool {
        if quantity > MAX_LINE_QUANTITY {
            return false;
        }
        let Some(subtotal) = unit_price.checked_multiply_quantity(quantity) else {
            return false;
        };
        self.lines
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != index)
            .try_fold(subtotal, |total, (_, line)| total.checked_add(line.subtotal()))
            .is_some()
    }

    fn notify(&self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for listener in &self.listeners {
            listener.on_cart_changed(&snapshot);
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// A rendered line: everything the cart panel shows for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SnapshotLine {
    pub item_id: ItemId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub subtotal: Money,
}

impl From<&CartLine> for SnapshotLine {
    fn from(line: &CartLine) -> Self {
        SnapshotLine {
            item_id: line.item_id,
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            subtotal: line.subtotal(),
        }
    }
}

/// Immutable view of the cart handed to the presentation layer and the
/// transaction submitter. Money fields serialize as integer cents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub lines: Vec<SnapshotLine>,
    pub total: Money,
    pub item_count: usize,
    pub total_quantity: i64,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// One bill entry per line, priced from the line itself.
    pub fn bill_lines(&self) -> Vec<BillLine> {
        self.lines
            .iter()
            .map(|line| BillLine {
                item_id: line.item_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect()
    }
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        let lines: Vec<SnapshotLine> = cart.lines.iter().map(SnapshotLine::from).collect();
        CartSnapshot {
            total: lines.iter().map(|line| line.subtotal).sum(),
            item_count: lines.len(),
            total_quantity: lines.iter().map(|line| line.quantity).sum(),
            lines,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn tea() -> CatalogItem {
        CatalogItem::new(1, "Tea", "2.50".parse().unwrap())
    }

    fn scone() -> CatalogItem {
        CatalogItem::new(2, "Scone", Money::from_cents(325))
    }

    fn assert_invariants(cart: &Cart) {
        let snapshot = cart.snapshot();
        let sum: Money = snapshot.lines.iter().map(|l| l.subtotal).sum();
        assert_eq!(snapshot.total, sum);
        assert_eq!(cart.total(), sum);
        for line in &snapshot.lines {
            assert!(line.quantity >= 1, "line {} has quantity {}", line.item_id, line.quantity);
            assert_eq!(line.subtotal, line.unit_price * line.quantity);
        }
        let mut ids: Vec<_> = snapshot.lines.iter().map(|l| l.item_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), snapshot.lines.len(), "duplicate lines");
    }

    #[derive(Default)]
    struct Recorder {
        snapshots: Mutex<Vec<CartSnapshot>>,
    }

    impl CartListener for Recorder {
        fn on_cart_changed(&self, snapshot: &CartSnapshot) {
            self.snapshots.lock().unwrap().push(snapshot.clone());
        }
    }

    #[test]
    fn test_adding_same_item_twice() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_item(&tea()), LineChange::Added);
        assert_eq!(
            cart.add_item(&tea()),
            LineChange::Incremented { quantity: 2 }
        );

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.lines.len(), 1);
        assert_eq!(snapshot.lines[0].item_id, 1);
        assert_eq!(snapshot.lines[0].quantity, 2);
        assert_eq!(snapshot.lines[0].subtotal, Money::from_cents(500));
        assert_eq!(snapshot.total, Money::from_cents(500));
        assert_invariants(&cart);
    }

    #[test]
    fn test_quantity_tracks_add_count() {
        for count in 1..=25 {
            let mut cart = Cart::new();
            for _ in 0..count {
                cart.add_item(&scone());
            }
            let line = cart.line(2).unwrap();
            assert_eq!(line.quantity(), count);
            assert_eq!(line.subtotal(), Money::from_cents(325 * count));
            assert_invariants(&cart);
        }
    }

    #[test]
    fn test_price_is_captured_when_line_is_created() {
        let mut cart = Cart::new();
        cart.add_item(&tea());

        let mut repriced = tea();
        repriced.price = Money::from_cents(300);
        repriced.name = "Chai".to_string();
        cart.add_item(&repriced);

        let line = cart.line(1).unwrap();
        assert_eq!(line.unit_price(), Money::from_cents(250));
        assert_eq!(line.name(), "Tea");
        assert_eq!(line.subtotal(), Money::from_cents(500));
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(&scone());
        cart.add_item(&tea());
        cart.add_item(&scone());

        let ids: Vec<_> = cart.lines().iter().map(CartLine::item_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_adjust_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&tea());
        cart.add_item(&tea());

        assert_eq!(cart.adjust_quantity(1, -2), LineChange::Removed);
        assert!(cart.is_empty());
        assert_eq!(cart.snapshot().total, Money::zero());
        assert_eq!(cart.snapshot().total.to_string(), "$0.00");
    }

    #[test]
    fn test_adjust_past_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&tea());
        cart.add_item(&scone());

        assert_eq!(cart.adjust_quantity(2, -40), LineChange::Removed);
        assert_eq!(cart.len(), 1);
        assert!(cart.line(2).is_none());
        assert_invariants(&cart);
    }

    #[test]
    fn test_adjust_recomputes_subtotal() {
        let mut cart = Cart::new();
        cart.add_item(&scone());

        assert_eq!(
            cart.adjust_quantity(2, 4),
            LineChange::Updated { quantity: 5 }
        );
        assert_eq!(cart.line(2).unwrap().subtotal(), Money::from_cents(1625));
        assert_eq!(
            cart.adjust_quantity(2, -3),
            LineChange::Updated { quantity: 2 }
        );
        assert_eq!(cart.total(), Money::from_cents(650));
        assert_invariants(&cart);
    }

    #[test]
    fn test_huge_delta_is_refused() {
        let recorder = Arc::new(Recorder::default());
        let mut cart = Cart::new();
        cart.subscribe(recorder.clone());
        cart.add_item(&tea());

        assert_eq!(cart.adjust_quantity(1, i64::MAX), LineChange::Refused);
        assert_eq!(cart.adjust_quantity(1, MAX_LINE_QUANTITY), LineChange::Refused);
        assert_eq!(cart.line(1).unwrap().quantity(), 1);
        assert_invariants(&cart);
        assert_eq!(recorder.snapshots.lock().unwrap().len(), 1);

        assert_eq!(
            cart.adjust_quantity(1, MAX_LINE_QUANTITY - 1),
            LineChange::Updated { quantity: MAX_LINE_QUANTITY }
        );
        assert_eq!(cart.add_item(&tea()), LineChange::Refused);
        assert_eq!(cart.adjust_quantity(1, i64::MIN), LineChange::Removed);
        assert_invariants(&cart);
    }

    #[test]
    fn test_total_stays_in_cent_range() {
        let pricey = CatalogItem::new(7, "Estate", Money::from_cents(i64::MAX / 2));
        let mut cart = Cart::new();

        assert_eq!(cart.add_item(&pricey), LineChange::Added);
        assert_eq!(cart.add_item(&pricey), LineChange::Incremented { quantity: 2 });
        assert_eq!(cart.add_item(&pricey), LineChange::Refused);
        assert_eq!(cart.add_item(&tea()), LineChange::Refused);
        assert_eq!(cart.adjust_quantity(7, 5), LineChange::Refused);
        assert_eq!(cart.line(7).unwrap().quantity(), 2);
        assert!(cart.line(1).is_none());
        assert_invariants(&cart);
    }

    #[test]
    fn test_settle_unchanged_cart_clears() {
        let mut cart = Cart::new();
        cart.add_item(&tea());
        cart.add_item(&scone());
        let billed = cart.snapshot();

        assert_eq!(cart.settle(&billed), LineChange::Cleared);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_settle_keeps_what_was_not_billed() {
        let recorder = Arc::new(Recorder::default());
        let mut cart = Cart::new();
        cart.add_item(&tea());
        cart.add_item(&scone());
        let billed = cart.snapshot();

        cart.subscribe(recorder.clone());
        cart.add_item(&tea());
        cart.add_item(&CatalogItem::new(3, "Jam", Money::from_cents(99)));

        assert_eq!(cart.settle(&billed), LineChange::Settled { remaining: 2 });
        let ids: Vec<_> = cart.lines().iter().map(CartLine::item_id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(cart.line(1).unwrap().quantity(), 1);
        assert_eq!(cart.total(), Money::from_cents(349));
        assert_invariants(&cart);

        // two adds, one settle
        assert_eq!(recorder.snapshots.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_settle_after_removal_mid_bill() {
        let mut cart = Cart::new();
        cart.add_item(&tea());
        cart.add_item(&scone());
        let billed = cart.snapshot();

        cart.remove_item(2);
        assert_eq!(cart.settle(&billed), LineChange::Cleared);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_absent_ids_are_noops() {
        let mut cart = Cart::new();
        cart.add_item(&tea());
        let before = cart.snapshot();

        assert_eq!(cart.remove_item(99), LineChange::Unchanged);
        assert_eq!(cart.adjust_quantity(99, 1), LineChange::Unchanged);
        assert_eq!(cart.adjust_quantity(99, -1), LineChange::Unchanged);

        assert_eq!(cart.snapshot(), before);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(&tea());
        cart.add_item(&scone());

        assert_eq!(cart.remove_item(1), LineChange::Removed);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Money::from_cents(325));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(&tea());
        cart.add_item(&scone());
        assert!(!cart.is_empty());

        assert_eq!(cart.clear(), LineChange::Cleared);
        assert!(cart.is_empty());
        assert!(cart.snapshot().is_empty());
    }

    #[test]
    fn test_snapshot_is_detached_and_repeatable() {
        let mut cart = Cart::new();
        cart.add_item(&tea());
        cart.add_item(&scone());

        let first = cart.snapshot();
        let second = cart.snapshot();
        assert_eq!(first, second);

        let mut tampered = cart.snapshot();
        tampered.lines[0].quantity = 100;
        tampered.lines.pop();
        tampered.total = Money::from_cents(1);

        assert_eq!(cart.snapshot(), first);
        assert_eq!(first.item_count, 2);
        assert_eq!(first.total_quantity, 2);
    }

    #[test]
    fn test_invariants_hold_across_mixed_operations() {
        let items = [tea(), scone(), CatalogItem::new(3, "Jam", Money::from_cents(99))];
        let mut cart = Cart::new();

        // Deterministic walk over add/adjust/remove combinations.
        for step in 0..200_i64 {
            let item = &items[(step % 3) as usize];
            match step % 7 {
                0 | 1 | 2 => {
                    cart.add_item(item);
                }
                3 => {
                    cart.adjust_quantity(item.id, -(step % 4));
                }
                4 => {
                    cart.adjust_quantity(item.id, step % 5);
                }
                5 => {
                    cart.remove_item(item.id);
                }
                _ => {
                    cart.adjust_quantity(item.id, -1);
                }
            }
            assert_invariants(&cart);
        }
    }

    #[test]
    fn test_bill_lines_use_cart_prices() {
        let mut cart = Cart::new();
        cart.add_item(&tea());
        cart.add_item(&tea());
        cart.add_item(&scone());

        let lines = cart.snapshot().bill_lines();
        assert_eq!(
            lines,
            vec![
                BillLine {
                    item_id: 1,
                    quantity: 2,
                    unit_price: Money::from_cents(250)
                },
                BillLine {
                    item_id: 2,
                    quantity: 1,
                    unit_price: Money::from_cents(325)
                },
            ]
        );
    }

    #[test]
    fn test_listeners_receive_snapshots() {
        let recorder = Arc::new(Recorder::default());
        let mut cart = Cart::new();
        cart.subscribe(recorder.clone());

        cart.add_item(&tea());
        cart.add_item(&tea());
        cart.adjust_quantity(1, -1);
        cart.adjust_quantity(42, 1); // absent: no notification
        cart.remove_item(1);
        cart.clear();

        let snapshots = recorder.snapshots.lock().unwrap();
        let quantities: Vec<i64> = snapshots.iter().map(|s| s.total_quantity).collect();
        assert_eq!(quantities, vec![1, 2, 1, 0, 0]);
        assert_eq!(snapshots[1].total, Money::from_cents(500));
    }

    #[test]
    fn test_snapshot_serializes_for_presentation() {
        let mut cart = Cart::new();
        cart.add_item(&tea());

        let json = serde_json::to_value(cart.snapshot()).unwrap();
        assert_eq!(json["itemCount"], 1);
        assert_eq!(json["lines"][0]["unitPrice"], 250);
        assert_eq!(json["total"], 250);
    }
}
