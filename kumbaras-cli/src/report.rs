//! Terminal views. Each is built as data first (JSON-serializable), then rendered.

use chrono::NaiveDate;
use kumbaras_core::{Allocation, GoalProjection, SavingsGoal, Transaction, allocate_savings};
use kumbaras_finance::advisor::{AdviceReport, financial_advice, quick_advice};
use kumbaras_finance::analytics::spend_by_category;
use kumbaras_finance::charts::{
    DailySpend, Flow, SubcategorySpend, cumulative_daily_spend, money_flows, subcategory_breakdown,
};
use kumbaras_finance::history::{
    CategoryTrend, HistoryTotals, MonthlyOverview, category_trends, monthly_overview, totals,
};
use kumbaras_finance::{BudgetLine, MonthSummary, check_budget, summarize, top_expenses};
use serde::Serialize;
use std::fmt::Write;

use crate::config::Config;

const BAR_WIDTH: usize = 20;

fn bar(progress: f64) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * BAR_WIDTH as f64).round()) as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

#[derive(Debug, Serialize)]
pub struct GoalView {
    pub allocation: Allocation,
    /// Projection at this month's savings rate
    pub projection: String,
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub month: String,
    pub summary: MonthSummary,
    pub verdict: String,
    pub budget: Vec<BudgetLine>,
    pub top_expenses: Vec<Transaction>,
    pub subcategories: Vec<SubcategorySpend>,
    pub daily: Vec<DailySpend>,
    pub flows: Vec<Flow>,
    pub goals: Vec<GoalView>,
    pub advice: AdviceReport,
}

impl Dashboard {
    pub fn build(month: &str, txns: &[Transaction], cfg: &Config, today: NaiveDate) -> Self {
        let summary = summarize(txns);
        let goals = goal_views(&cfg.goals, summary.savings, today);
        Self {
            month: month.to_string(),
            summary,
            verdict: quick_advice(summary.savings),
            budget: check_budget(txns, &cfg.limits()),
            top_expenses: top_expenses(txns, cfg.display.top_expenses)
                .into_iter()
                .cloned()
                .collect(),
            subcategories: subcategory_breakdown(txns),
            daily: cumulative_daily_spend(txns),
            flows: money_flows(txns, summary.income),
            goals,
            advice: financial_advice(txns, &summary),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let s = &self.summary;
        let _ = writeln!(out, "📊 {}\n", self.month);
        let _ = writeln!(out, "Income    {:>10.2}€", s.income);
        let _ = writeln!(out, "Expenses  {:>10.2}€", s.expenses);
        let _ = writeln!(out, "Savings   {:>10.2}€", s.savings);
        let _ = writeln!(out, "\n{}\n", self.verdict);

        let _ = writeln!(out, "## Budget");
        for line in &self.budget {
            let limit = if line.limit > 0.0 {
                format!("{:.0}€", line.limit)
            } else {
                "-".to_string()
            };
            let _ = writeln!(
                out,
                "{} {:<24} {:>9.2}€ / {:>6} {}",
                line.status.icon(),
                line.category.label(),
                line.actual,
                limit,
                bar(line.progress)
            );
        }

        let _ = writeln!(out, "\n## Top expenses");
        for t in &self.top_expenses {
            let _ = writeln!(
                out,
                "{}  {:>9.2}€  {:<36} {}",
                t.date.format("%d/%m"),
                t.amount,
                t.description,
                t.classification()
            );
        }

        if !self.flows.is_empty() {
            let _ = writeln!(out, "\n## Where the income went");
            for f in &self.flows {
                let _ = writeln!(out, "{} -> {:<14} {:>9.2}€", f.source, f.target, f.value);
            }
        }

        if !self.goals.is_empty() {
            let _ = writeln!(out, "\n## Goals");
            out.push_str(&render_goals(&self.goals));
        }

        let _ = writeln!(out, "\n## Advice");
        let _ = writeln!(out, "{}", self.advice.render());
        out
    }
}

pub fn goal_views(goals: &[SavingsGoal], monthly_savings: f64, today: NaiveDate) -> Vec<GoalView> {
    allocate_savings(monthly_savings, goals)
        .into_iter()
        .zip(goals)
        .map(|(allocation, goal)| GoalView {
            projection: goal.project(allocation.added, today).summary(),
            allocation,
        })
        .collect()
}

pub fn render_goals(goals: &[GoalView]) -> String {
    let mut out = String::new();
    for g in goals {
        let a = &g.allocation;
        let _ = writeln!(
            out,
            "{:<22} {} {:>5.1}%  {:.0}€ / {:.0}€ (+{:.2}€ this month)",
            a.name,
            bar(a.progress),
            a.progress.min(1.0) * 100.0,
            a.new_total,
            a.target,
            a.added
        );
        let _ = writeln!(out, "    {}", g.projection);
    }
    out
}

pub fn render_projection(goal: &SavingsGoal, monthly: f64, projection: &GoalProjection) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {:.0}€ of {:.0}€, adding {:.2}€/month",
        goal.name, goal.saved, goal.target, monthly
    );
    let _ = writeln!(out, "{}", projection.summary());
    if let GoalProjection::OnTrack { series, .. } = projection {
        for p in series {
            let _ = writeln!(
                out,
                "  {}  {:>10.2}€  {:?}",
                p.date.format("%Y-%m-%d"),
                p.balance,
                p.kind
            );
        }
    }
    out
}

#[derive(Debug, Serialize)]
pub struct History {
    pub overview: Vec<MonthlyOverview>,
    pub trends: Vec<CategoryTrend>,
    pub totals: HistoryTotals,
}

impl History {
    pub fn build(txns: &[Transaction]) -> Self {
        Self {
            overview: monthly_overview(txns),
            trends: category_trends(txns),
            totals: totals(txns),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<8} {:>11} {:>11} {:>11}",
            "Month", "Income", "Expenses", "Savings"
        );
        for m in &self.overview {
            let _ = writeln!(
                out,
                "{:<8} {:>10.2}€ {:>10.2}€ {:>10.2}€",
                m.period, m.income, m.expenses, m.savings
            );
        }

        let _ = writeln!(out, "\n## Spending by category");
        let mut period = "";
        for t in &self.trends {
            if t.period != period {
                period = &t.period;
                let _ = writeln!(out, "{period}");
            }
            let _ = writeln!(out, "  {:<24} {:>10.2}€", t.category.label(), t.amount);
        }

        let t = &self.totals;
        let _ = writeln!(
            out,
            "\n{} months: income {:.2}€, saved {:.2}€ ({:.1}%)",
            t.months, t.income, t.saved, t.saving_rate
        );
        out
    }
}

/// Rows of one month, numbered from 1
pub fn render_rows(txns: &[Transaction]) -> String {
    let mut out = String::new();
    for (i, t) in txns.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {}  {:>9.2}€  {:<36} {}",
            i + 1,
            t.date.format("%d/%m/%Y"),
            t.amount,
            t.description,
            t.classification()
        );
    }
    out
}

/// Spending per category label, for the budget listing
pub fn render_budget_limits(cfg: &Config, txns: &[Transaction]) -> String {
    let spent = spend_by_category(txns);
    let mut out = String::new();
    for (category, limit) in cfg.limits() {
        let actual = spent.get(&category).copied().unwrap_or(0.0);
        let _ = writeln!(out, "{:<24} {:>8.2}€  (spent {:.2}€)", category.label(), limit, actual);
    }
    out
}
