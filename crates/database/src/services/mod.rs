pub mod course;
pub mod instructor;
pub mod review;
pub mod student;

use chrono::Utc;
use sea_orm::entity::prelude::DateTime;
use sea_orm::sea_query::{Expr, ExprTrait, Func, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, IdenStatic};

pub(crate) fn now() -> DateTime {
    Utc::now().naive_utc()
}

/// Case-insensitive substring match: both sides are lowercased and the
/// needle may appear anywhere in the haystack.
pub(crate) fn contains_insensitive<C: ColumnTrait>(col: C, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", term.to_lowercase());
    Expr::expr(Func::lower(Expr::col(col))).like(pattern.as_str())
}

/// Composite full-name search: a term matches the first name, the last
/// name, or the concatenation "first last". The three probes are unioned,
/// so a term spanning the word boundary (e.g. "n D" against "John Doe")
/// only matches through the concatenated form.
pub(crate) fn full_name_condition<C: ColumnTrait>(first: C, last: C, term: &str) -> Condition {
    let pattern = format!("%{}%", term.to_lowercase());
    let concatenated = format!("lower({} || ' ' || {})", first.as_str(), last.as_str());

    Condition::any()
        .add(Expr::expr(Func::lower(Expr::col(first))).like(pattern.as_str()))
        .add(Expr::expr(Func::lower(Expr::col(last))).like(pattern.as_str()))
        .add(Expr::cust(concatenated).like(pattern.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::student;
    use sea_orm::{DatabaseBackend, EntityTrait, QueryFilter, QueryTrait};

    #[test]
    fn full_name_condition_unions_three_probes() {
        let sql = student::Entity::find()
            .filter(full_name_condition(
                student::Column::FirstName,
                student::Column::LastName,
                "n D",
            ))
            .build(DatabaseBackend::Sqlite)
            .to_string();

        assert_eq!(sql.matches("LIKE").count(), 3);
        assert!(sql.contains("%n d%"));
        assert!(sql.contains("||"));
    }

    #[test]
    fn contains_insensitive_lowercases_the_needle() {
        let sql = student::Entity::find()
            .filter(contains_insensitive(student::Column::FirstName, "JoHn"))
            .build(DatabaseBackend::Sqlite)
            .to_string();

        assert!(sql.contains("LOWER"));
        assert!(sql.contains("%john%"));
    }
}
