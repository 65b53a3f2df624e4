//! Clause-ordered SOQL rendering.

/// The clauses of a SOQL query, each optional.
///
/// Rendering always emits clauses in the canonical SOQL order (SELECT,
/// FROM, WHERE, GROUP BY, ORDER BY, LIMIT, OFFSET, HAVING), regardless of
/// the order the setters were called in. A clause that is unset or empty is
/// omitted entirely.
///
/// Clause bodies pass through verbatim: this type arranges clauses, it does
/// not validate or escape SOQL. Callers composing clause bodies from user
/// input must escape them before they get here.
///
/// # Example
///
/// ```rust,ignore
/// use sfbridge_rest::QueryClauses;
///
/// let soql = QueryClauses::new()
///     .select("Id, Name")
///     .from("Account")
///     .r#where("Industry = 'Technology'")
///     .limit("200")
///     .render();
/// assert_eq!(
///     soql,
///     "SELECT Id, Name FROM Account WHERE Industry = 'Technology' LIMIT 200"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryClauses {
    select: Option<String>,
    from: Option<String>,
    where_: Option<String>,
    group_by: Option<String>,
    order_by: Option<String>,
    limit: Option<String>,
    offset: Option<String>,
    having: Option<String>,
}

impl QueryClauses {
    /// Create an empty clause set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SELECT clause body.
    pub fn select(mut self, fields: impl Into<String>) -> Self {
        self.select = Some(fields.into());
        self
    }

    /// Set the FROM clause body.
    pub fn from(mut self, sobject: impl Into<String>) -> Self {
        self.from = Some(sobject.into());
        self
    }

    /// Set the WHERE clause body.
    pub fn r#where(mut self, condition: impl Into<String>) -> Self {
        self.where_ = Some(condition.into());
        self
    }

    /// Set the GROUP BY clause body.
    pub fn group_by(mut self, fields: impl Into<String>) -> Self {
        self.group_by = Some(fields.into());
        self
    }

    /// Set the ORDER BY clause body.
    pub fn order_by(mut self, fields: impl Into<String>) -> Self {
        self.order_by = Some(fields.into());
        self
    }

    /// Set the LIMIT clause body.
    pub fn limit(mut self, count: impl Into<String>) -> Self {
        self.limit = Some(count.into());
        self
    }

    /// Set the OFFSET clause body.
    pub fn offset(mut self, count: impl Into<String>) -> Self {
        self.offset = Some(count.into());
        self
    }

    /// Set the HAVING clause body.
    pub fn having(mut self, condition: impl Into<String>) -> Self {
        self.having = Some(condition.into());
        self
    }

    /// Returns true if a non-empty FROM clause is present.
    pub fn has_from(&self) -> bool {
        self.from.as_deref().is_some_and(|f| !f.is_empty())
    }

    /// Render the query string.
    pub fn render(&self) -> String {
        let parts: [(&str, &Option<String>); 8] = [
            ("SELECT", &self.select),
            ("FROM", &self.from),
            ("WHERE", &self.where_),
            ("GROUP BY", &self.group_by),
            ("ORDER BY", &self.order_by),
            ("LIMIT", &self.limit),
            ("OFFSET", &self.offset),
            ("HAVING", &self.having),
        ];

        let mut query = String::new();
        for (keyword, value) in parts {
            let Some(body) = value.as_deref().filter(|v| !v.is_empty()) else {
                continue;
            };
            if !query.is_empty() {
                query.push(' ');
            }
            query.push_str(keyword);
            query.push(' ');
            query.push_str(body);
        }
        query
    }
}
