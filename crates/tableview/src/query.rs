//! Query builder and executor.
//!
//! [`Query`] collects the current state of a list page (search box, filter
//! dropdowns, clicked column, pager) without knowing the record type.
//! [`Query::build`] checks it against a record schema once and returns a
//! [`ViewQuery`], which can then run against any number of collections and
//! never fails.
//!
//! A record is visible when:
//!
//! ```text
//! visible = search matches (any search field contains the term)
//!         ∧ every filter matches
//!         ∧ every AND clause matches
//!         ∧ (some OR clause matches, or there are none)
//!         ∧ no NOT clause matches
//! ```
//!
//! Matches are then sorted (stable, so ties keep collection order) and only
//! then cut to the requested page.

use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::clause::{Clause, ClauseValue};
use crate::error::Result;
use crate::filter::{Accept, Filter, FilterSpec};
use crate::op::Op;
use crate::ordering::{compare_records, Dir, NullOrder, SortSpec};
use crate::page::PageSpec;
use crate::schema::Schema;
use crate::search::{CompiledSearch, SearchSpec};
use crate::settings::ViewSettings;
use crate::traits::Record;
use crate::value::Timestamp;
use crate::view::ViewPage;

#[derive(Debug, Clone, Copy)]
enum PageChoice {
    Spec(PageSpec),
    Index(usize),
}

/// An unchecked query spec.
///
/// ```
/// use tableview::{Dir, Query};
///
/// let query = Query::new()
///     .search("acme", ["customer", "contract_no"])
///     .filter("status", "active")
///     .filter("region", "all")
///     .and_gte("value", 10_000)
///     .sort_by("end_date", Dir::Asc)
///     .page(10, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    search: Option<SearchSpec>,
    filters: FilterSpec,
    and_clauses: Vec<Clause>,
    or_clauses: Vec<Clause>,
    not_clauses: Vec<Clause>,
    sort: Vec<SortSpec>,
    page: Option<PageChoice>,
    settings: ViewSettings,
}

impl Query {
    /// Creates an empty query, which shows every record in collection order.
    pub fn new() -> Self {
        Query::default()
    }

    pub fn with_settings(mut self, settings: ViewSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    // ------------------------------------------------------------------
    // Search and filters
    // ------------------------------------------------------------------

    /// Sets the search box: `term` is looked for in each of `fields`.
    pub fn search<I, S>(self, term: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_spec(SearchSpec::new(term, fields))
    }

    pub fn search_spec(mut self, search: SearchSpec) -> Self {
        self.search = Some(search);
        self
    }

    /// Sets a filter dropdown. Text equal to the "all" sentinel leaves the
    /// field unconstrained.
    pub fn filter(mut self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.filters.push(Filter::new(field, Accept::Only(value.into())));
        self
    }

    /// Sets a filter dropdown to "all".
    pub fn filter_all(mut self, field: &str) -> Self {
        self.filters.push(Filter::new(field, Accept::All));
        self
    }

    /// Adds every filter of `filters`.
    pub fn filters(mut self, filters: FilterSpec) -> Self {
        for filter in filters {
            self.filters.push(filter);
        }
        self
    }

    // ------------------------------------------------------------------
    // Clause groups
    // ------------------------------------------------------------------

    /// Adds a clause that must match.
    pub fn and(mut self, field: &str, op: Op, value: impl Into<ClauseValue>) -> Self {
        self.and_clauses.push(Clause::new(field, op, value));
        self
    }

    /// Adds a clause to the OR group; at least one of the group must match.
    pub fn or(mut self, field: &str, op: Op, value: impl Into<ClauseValue>) -> Self {
        self.or_clauses.push(Clause::new(field, op, value));
        self
    }

    /// Adds a clause that must not match.
    pub fn not(mut self, field: &str, op: Op, value: impl Into<ClauseValue>) -> Self {
        self.not_clauses.push(Clause::new(field, op, value));
        self
    }

    pub fn and_gt(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Gt, value)
    }

    pub fn and_gte(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Gte, value)
    }

    pub fn and_lt(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Lt, value)
    }

    pub fn and_lte(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Lte, value)
    }

    pub fn and_before(self, field: &str, ts: impl Into<Timestamp>) -> Self {
        let ts: Timestamp = ts.into();
        self.and(field, Op::Before, ts)
    }

    pub fn and_after(self, field: &str, ts: impl Into<Timestamp>) -> Self {
        let ts: Timestamp = ts.into();
        self.and(field, Op::After, ts)
    }

    /// Adds an AND clause accepting any of `values`.
    pub fn and_in<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ClauseValue>,
    {
        self.and(field, Op::In, ClauseValue::set(values))
    }

    /// Adds an AND regex clause. The pattern is compiled by [`Query::build`].
    pub fn and_regex(self, field: &str, pattern: &str) -> Self {
        self.and(field, Op::Regex, pattern)
    }

    pub fn or_eq(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.or(field, Op::Eq, value)
    }

    pub fn or_contains(self, field: &str, value: &str) -> Self {
        self.or(field, Op::Contains, value)
    }

    pub fn not_eq(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.not(field, Op::Eq, value)
    }

    pub fn not_in<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ClauseValue>,
    {
        self.not(field, Op::In, ClauseValue::set(values))
    }

    // ------------------------------------------------------------------
    // Sorting
    // ------------------------------------------------------------------

    /// Sorts by `field`, replacing any earlier sort keys.
    pub fn sort_by(mut self, field: &str, dir: Dir) -> Self {
        self.sort = vec![SortSpec::new(field, dir)];
        self
    }

    pub fn sort_asc(self, field: &str) -> Self {
        self.sort_by(field, Dir::Asc)
    }

    pub fn sort_desc(self, field: &str) -> Self {
        self.sort_by(field, Dir::Desc)
    }

    /// Adds a tie-breaking sort key after the existing ones.
    pub fn then_by(mut self, field: &str, dir: Dir) -> Self {
        self.sort.push(SortSpec::new(field, dir));
        self
    }

    /// Replaces the sort with `spec`; `None` keeps collection order.
    pub fn sorted(mut self, spec: Option<SortSpec>) -> Self {
        self.sort = spec.into_iter().collect();
        self
    }

    // ------------------------------------------------------------------
    // Paging
    // ------------------------------------------------------------------

    pub fn page(self, size: usize, index: usize) -> Self {
        self.page_spec(PageSpec::new(size, index))
    }

    pub fn page_spec(mut self, page: PageSpec) -> Self {
        self.page = Some(PageChoice::Spec(page));
        self
    }

    /// Pages with the default page size from the settings.
    pub fn page_index(mut self, index: usize) -> Self {
        self.page = Some(PageChoice::Index(index));
        self
    }

    // ------------------------------------------------------------------
    // Build
    // ------------------------------------------------------------------

    /// Checks every part of the query against `T`'s schema.
    ///
    /// Fails with a [`ConfigurationError`](crate::ConfigurationError) on
    /// the first field, operator, value or page that does not fit.
    pub fn build<T: Record>(self) -> Result<ViewQuery<T>> {
        let schema = T::schema();
        self.compile(schema)
            .map(|plan| ViewQuery {
                plan,
                _record: PhantomData,
            })
            .inspect_err(|err| {
                debug!(record = schema.record(), error = %err, "rejected query spec");
            })
    }

    fn compile(self, schema: &Schema) -> Result<Plan> {
        let Query {
            search,
            filters,
            and_clauses,
            or_clauses,
            not_clauses,
            sort,
            page,
            settings,
        } = self;

        let search = search.map(|spec| spec.compile(schema)).transpose()?;
        let filters = filters.resolve(schema, &settings.all_sentinel)?;
        let resolve_all = |clauses: Vec<Clause>| {
            clauses
                .into_iter()
                .map(|clause| clause.resolve(schema))
                .collect::<Result<Vec<_>>>()
        };
        let and_clauses = resolve_all(and_clauses)?;
        let or_clauses = resolve_all(or_clauses)?;
        let not_clauses = resolve_all(not_clauses)?;

        for key in &sort {
            schema.require(&key.field)?;
        }

        let page = page
            .map(|choice| match choice {
                PageChoice::Spec(spec) => spec,
                PageChoice::Index(index) => PageSpec::new(settings.default_page_size, index),
            })
            .map(|spec| spec.validate(settings.max_page_size))
            .transpose()?;

        Ok(Plan {
            search,
            filters,
            and_clauses,
            or_clauses,
            not_clauses,
            sort,
            page,
            null_order: settings.null_order,
        })
    }
}

#[derive(Debug, Clone)]
struct Plan {
    search: Option<CompiledSearch>,
    filters: Vec<Clause>,
    and_clauses: Vec<Clause>,
    or_clauses: Vec<Clause>,
    not_clauses: Vec<Clause>,
    sort: Vec<SortSpec>,
    page: Option<PageSpec>,
    null_order: NullOrder,
}

/// A query checked against the schema of `T`.
pub struct ViewQuery<T> {
    plan: Plan,
    _record: PhantomData<fn(&T)>,
}

impl<T> Clone for ViewQuery<T> {
    fn clone(&self) -> Self {
        ViewQuery {
            plan: self.plan.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ViewQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewQuery").field("plan", &self.plan).finish()
    }
}

impl<T: Record> ViewQuery<T> {
    /// Tests one record against search, filters and clause groups.
    pub fn matches(&self, record: &T) -> bool {
        let plan = &self.plan;
        let holds = |clause: &Clause| clause.matches(&record.field_value(&clause.field));

        plan.search.as_ref().map_or(true, |search| search.matches(record))
            && plan.filters.iter().all(holds)
            && plan.and_clauses.iter().all(holds)
            && (plan.or_clauses.is_empty() || plan.or_clauses.iter().any(holds))
            && !plan.not_clauses.iter().any(holds)
    }

    /// Computes the visible page of `records`.
    pub fn run<'a>(&self, records: &'a [T]) -> ViewPage<'a, T> {
        let plan = &self.plan;
        let mut matched: Vec<&'a T> = records.iter().filter(|record| self.matches(record)).collect();

        if !plan.sort.is_empty() {
            matched.sort_by(|a, b| compare_records(*a, *b, &plan.sort, plan.null_order));
        }

        let total_matched = matched.len();
        let (visible, page) = match plan.page {
            Some(spec) => {
                let window = spec.window(total_matched);
                (matched[window].to_vec(), Some(spec.info(total_matched)))
            }
            None => (matched, None),
        };

        trace!(
            record = T::schema().record(),
            rows = records.len(),
            matched = total_matched,
            visible = visible.len(),
            "ran view query"
        );

        ViewPage {
            records: visible,
            total_matched,
            page,
        }
    }

    /// Number of matching records, ignoring paging.
    pub fn count(&self, records: &[T]) -> usize {
        records.iter().filter(|record| self.matches(record)).count()
    }

    pub fn sort_keys(&self) -> &[SortSpec] {
        &self.plan.sort
    }

    pub fn page(&self) -> Option<PageSpec> {
        self.plan.page
    }
}

/// Runs a one-off query: search, filter, sort, then page `collection`.
///
/// Equivalent to building a [`Query`] from the parts and running it.
pub fn query<'a, T: Record>(
    collection: &'a [T],
    search: Option<SearchSpec>,
    filters: FilterSpec,
    sort: Option<SortSpec>,
    page: Option<PageSpec>,
) -> Result<ViewPage<'a, T>> {
    let mut builder = Query::new().filters(filters).sorted(sort);
    if let Some(search) = search {
        builder = builder.search_spec(search);
    }
    if let Some(page) = page {
        builder = builder.page_spec(page);
    }
    Ok(builder.build::<T>()?.run(collection))
}
