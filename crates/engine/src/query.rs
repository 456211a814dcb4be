//! The base query contract shared by every engine query handle.

use crate::error::EngineResult;

/// A query handle accumulating filters and ordering against the engine.
///
/// A handle is obtained from a [`ProcessEngine`](crate::ProcessEngine),
/// belongs to a single request, and is consumed by exactly one terminal
/// operation. Filter and ordering calls are setter-style and infallible;
/// an engine that objects to the accumulated query reports this from the
/// terminal operation as [`EngineError`](crate::EngineError).
///
/// Ordering is applied per criterion: an `order_by_*` call on the concrete
/// handle trait selects the field, and [`asc`](Query::asc) or
/// [`desc`](Query::desc) fixes the direction of that most recent criterion.
/// Later criteria act as tie-breakers for earlier ones.
pub trait Query: Sized {
    /// The record type the query produces.
    type Item;

    /// Sorts the most recently selected ordering field ascending.
    fn asc(&mut self);

    /// Sorts the most recently selected ordering field descending.
    fn desc(&mut self);

    /// Executes the query and returns all matching records.
    fn list(self) -> EngineResult<Vec<Self::Item>>;

    /// Executes the query and returns one page of matching records.
    ///
    /// `first_result` is the number of leading matches to skip and
    /// `max_results` the maximum number of records to return.
    fn list_page(self, first_result: u32, max_results: u32) -> EngineResult<Vec<Self::Item>>;

    /// Executes the query and returns only the number of matching records.
    fn count(self) -> EngineResult<u64>;
}
