//! Pure render functions from a [`Snapshot`] to view descriptions.
//!
//! Components only translate these descriptions into markup, so everything
//! the user can see is decided here and testable without a browser.

use crate::config::{LATEST_DT, VERIFIED_KINGDOM};
use crate::format::{format_value, metric_label, rank_class, MISSING};
use crate::model::{Leaderboard, LeaderboardRow, Metric};
use crate::store::Snapshot;

/// What the results panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    /// Nothing loaded yet.
    Idle,
    Loading,
    Error { message: String },
    /// A response with no rows.
    Empty,
    Table(TableView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    /// e.g. "Top 50 by Power"
    pub title: String,
    /// e.g. "Kingdom 3951 • 2024-01-01"
    pub metadata: String,
    pub value_header: String,
    pub rows: Vec<RowView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub rank: usize,
    pub rank_class: Option<&'static str>,
    pub id: String,
    pub name: String,
    pub alliance: String,
    pub value: String,
}

/// Loading wins over an error, which wins over data.
pub fn results_view(snapshot: &Snapshot) -> ResultsView {
    if snapshot.loading {
        ResultsView::Loading
    } else if let Some(message) = &snapshot.error {
        ResultsView::Error {
            message: message.clone(),
        }
    } else if let Some(data) = &snapshot.leaderboard_data {
        table_view(data)
    } else {
        ResultsView::Idle
    }
}

fn table_view(data: &Leaderboard) -> ResultsView {
    if data.rows.is_empty() {
        return ResultsView::Empty;
    }

    let label = metric_label(&data.metric);
    ResultsView::Table(TableView {
        title: format!("Top {} by {}", data.rows.len(), label),
        metadata: format!("Kingdom {} \u{2022} {}", data.kingdom, data.dt),
        value_header: label,
        rows: data
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| row_view(row, idx + 1))
            .collect(),
    })
}

fn text_or(field: &Option<String>, fallback: &str) -> String {
    field
        .as_deref()
        .filter(|text| !text.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn row_view(row: &LeaderboardRow, rank: usize) -> RowView {
    RowView {
        rank,
        rank_class: rank_class(rank),
        id: text_or(&row.id, MISSING),
        name: text_or(&row.name, "Unknown"),
        alliance: text_or(&row.alliance, MISSING),
        value: format_value(&row.value),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KingdomFieldView {
    pub value: String,
    /// Data outside the verified kingdom may be incomplete.
    pub show_unverified_warning: bool,
}

pub fn kingdom_field(snapshot: &Snapshot) -> KingdomFieldView {
    KingdomFieldView {
        value: snapshot.kingdom.clone(),
        show_unverified_warning: !snapshot.kingdom.is_empty()
            && snapshot.kingdom != VERIFIED_KINGDOM,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricOption {
    pub metric: Metric,
    pub selected: bool,
}

pub fn metric_options(snapshot: &Snapshot) -> Vec<MetricOption> {
    Metric::ALL
        .into_iter()
        .map(|metric| MetricOption {
            metric,
            selected: metric == snapshot.metric,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFieldView {
    /// Date input content; blank while "Use Latest" is on.
    pub value: String,
    pub disabled: bool,
    pub use_latest: bool,
}

pub fn date_field(snapshot: &Snapshot) -> DateFieldView {
    let value = if snapshot.use_latest || snapshot.dt == LATEST_DT {
        String::new()
    } else {
        snapshot.dt.clone()
    };
    DateFieldView {
        value,
        disabled: snapshot.use_latest,
        use_latest: snapshot.use_latest,
    }
}

pub fn limit_field(snapshot: &Snapshot) -> String {
    snapshot.limit.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(id: &str, name: &str, alliance: &str, value: serde_json::Value) -> LeaderboardRow {
        LeaderboardRow {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            alliance: Some(alliance.to_string()),
            value,
        }
    }

    fn board(rows: Vec<LeaderboardRow>) -> Leaderboard {
        Leaderboard {
            kingdom: "3951".to_string(),
            metric: "killpoints".to_string(),
            dt: "2024-01-01".to_string(),
            limit: Some(100),
            rows,
        }
    }

    fn with_data(data: Leaderboard) -> Snapshot {
        Snapshot {
            leaderboard_data: Some(data),
            ..Snapshot::default()
        }
    }

    #[test]
    fn idle_before_first_load() {
        assert_eq!(results_view(&Snapshot::default()), ResultsView::Idle);
    }

    #[test]
    fn loading_and_error_take_precedence() {
        let mut snapshot = with_data(board(vec![row("1", "A", "X", json!(1))]));
        snapshot.error = Some("kingdom not found".to_string());
        assert_eq!(
            results_view(&snapshot),
            ResultsView::Error {
                message: "kingdom not found".to_string()
            }
        );

        snapshot.loading = true;
        assert_eq!(results_view(&snapshot), ResultsView::Loading);
    }

    #[test]
    fn empty_rows_render_empty_state() {
        assert_eq!(results_view(&with_data(board(vec![]))), ResultsView::Empty);
    }

    #[test]
    fn table_rows_are_ranked_and_formatted() {
        let data = board(vec![
            row("11", "Alpha", "[AA]", json!(98765432)),
            row("12", "Beta", "[BB]", json!("5000")),
            row("13", "Gamma", "", json!(null)),
            row("14", "Delta", "[DD]", json!(12)),
        ]);

        let ResultsView::Table(table) = results_view(&with_data(data)) else {
            panic!("expected a table");
        };

        assert_eq!(table.title, "Top 4 by Kill Points");
        assert_eq!(table.metadata, "Kingdom 3951 • 2024-01-01");
        assert_eq!(table.value_header, "Kill Points");
        assert_eq!(
            table.rows.iter().map(|r| r.rank_class).collect::<Vec<_>>(),
            vec![Some("rank-1"), Some("rank-2"), Some("rank-3"), None]
        );
        assert_eq!(table.rows[0].value, "98,765,432");
        assert_eq!(table.rows[1].value, "5,000");
        assert_eq!(table.rows[2].value, "-");
        assert_eq!(table.rows[2].alliance, "-");
        assert_eq!(table.rows[3].rank, 4);
    }

    #[test]
    fn missing_text_uses_placeholders() {
        let data = board(vec![LeaderboardRow::default()]);
        let ResultsView::Table(table) = results_view(&with_data(data)) else {
            panic!("expected a table");
        };

        let only = &table.rows[0];
        assert_eq!(only.id, "-");
        assert_eq!(only.name, "Unknown");
        assert_eq!(only.alliance, "-");
        assert_eq!(only.value, "-");
    }

    #[test]
    fn markup_like_names_are_kept_as_text() {
        let data = board(vec![row("1", "<script>x</script>", "&", json!(1))]);
        let ResultsView::Table(table) = results_view(&with_data(data)) else {
            panic!("expected a table");
        };

        assert_eq!(table.rows[0].name, "<script>x</script>");
        assert_eq!(table.rows[0].alliance, "&");
    }

    #[test]
    fn unknown_metric_header_uses_raw_name() {
        let mut data = board(vec![row("1", "A", "X", json!(1))]);
        data.metric = "t4kills".to_string();
        let ResultsView::Table(table) = results_view(&with_data(data)) else {
            panic!("expected a table");
        };

        assert_eq!(table.value_header, "t4kills");
        assert_eq!(table.title, "Top 1 by t4kills");
    }

    #[test]
    fn kingdom_warning_only_for_other_kingdoms() {
        let mut snapshot = Snapshot::default();
        assert!(!kingdom_field(&snapshot).show_unverified_warning);

        snapshot.kingdom = String::new();
        assert!(!kingdom_field(&snapshot).show_unverified_warning);

        snapshot.kingdom = "1234".to_string();
        let field = kingdom_field(&snapshot);
        assert!(field.show_unverified_warning);
        assert_eq!(field.value, "1234");
    }

    #[test]
    fn date_field_follows_use_latest() {
        let mut snapshot = Snapshot::default();
        assert_eq!(
            date_field(&snapshot),
            DateFieldView {
                value: String::new(),
                disabled: true,
                use_latest: true,
            }
        );

        snapshot.use_latest = false;
        snapshot.dt = "2024-02-02".to_string();
        let field = date_field(&snapshot);
        assert_eq!(field.value, "2024-02-02");
        assert!(!field.disabled);
    }

    #[test]
    fn exactly_one_metric_is_selected() {
        let snapshot = Snapshot {
            metric: Metric::Kills,
            ..Snapshot::default()
        };
        let options = metric_options(&snapshot);

        assert_eq!(options.len(), 4);
        assert_eq!(
            options.iter().filter(|o| o.selected).map(|o| o.metric).collect::<Vec<_>>(),
            vec![Metric::Kills]
        );
    }

    #[test]
    fn limit_field_shows_number() {
        assert_eq!(limit_field(&Snapshot::default()), "100");
    }
}
