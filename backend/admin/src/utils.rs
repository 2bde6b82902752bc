use std::io::{self, BufRead, Write};

use ordering::{MissingOrderPlan, OrderAssignment, OrderingSummary, Product, duplicate_groups};

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Asks a yes/no question. Anything other than an explicit yes declines.
pub fn confirm(prompt: &str, mut input: impl BufRead, mut output: impl Write) -> io::Result<bool> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(is_yes(&answer))
}

pub fn format_product(product: &Product) -> String {
    let badge = match product.display_order {
        Some(order) => format!("#{order}"),
        None => "unordered".to_string(),
    };

    format!(
        "{badge:>10}  {}  (added {})",
        product.id,
        product.created_at.format("%Y-%m-%d %H:%M")
    )
}

pub fn format_summary(summary: &OrderingSummary) -> String {
    format!(
        "{}: {} products, {} unordered, {} duplicate orders, next order {}",
        summary.category_id,
        summary.total,
        summary.unordered,
        summary.duplicates,
        summary.next_available_order
    )
}

pub fn format_duplicates(products: &[Product], category_id: &str) -> Vec<String> {
    duplicate_groups(products, category_id)
        .into_iter()
        .map(|(order, members)| {
            let ids: Vec<&str> = members.iter().map(|p| p.id.as_str()).collect();
            format!("#{order} shared by {}", ids.join(", "))
        })
        .collect()
}

/// Confirmation for auto-organize, naming how many products will change.
pub fn organize_prompt(category_id: &str, plan: &MissingOrderPlan) -> String {
    match plan.range {
        Some(range) => format!(
            "Assign orders {} to {} to {} unordered products in {category_id}?",
            range.start_order,
            range.end_order,
            plan.instructions.len()
        ),
        None => format!("No unordered products in {category_id}. Continue?"),
    }
}

/// Confirmation for fix-duplicates. Closing gaps can move more products than
/// there are duplicates, so the count comes from the plan.
pub fn fix_duplicates_prompt(summary: &OrderingSummary, plan: &[OrderAssignment]) -> String {
    format!(
        "Renumber {} products in {} to clear {} duplicate orders?",
        plan.len(),
        summary.category_id,
        summary.duplicates
    )
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    fn product(id: &str, order: Option<i64>, created: i64) -> Product {
        Product {
            id: id.to_string(),
            category_id: "benches".to_string(),
            display_order: order,
            created_at: DateTime::from_timestamp(created, 0).unwrap(),
        }
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_confirm() {
        let mut prompt = Vec::new();
        assert!(confirm("Continue?", "y\n".as_bytes(), &mut prompt).unwrap());
        assert_eq!(String::from_utf8(prompt).unwrap(), "Continue? [y/N] ");

        assert!(!confirm("Continue?", "\n".as_bytes(), Vec::new()).unwrap());
        assert!(!confirm("Continue?", "".as_bytes(), Vec::new()).unwrap());
    }

    #[test]
    fn test_format_product() {
        let line = format_product(&product("bench-1", Some(3), 0));
        assert_eq!(line, "        #3  bench-1  (added 1970-01-01 00:00)");

        assert!(format_product(&product("bench-2", None, 0)).contains("unordered"));
    }

    #[test]
    fn test_fix_duplicates_prompt_counts_moved_products() {
        let products = vec![
            product("a", Some(1), 10),
            product("b", Some(1), 20),
            product("c", Some(9), 30),
        ];
        let summary = ordering::summarize(&products, "benches");
        let plan = ordering::plan_duplicate_repair(&products, "benches");

        assert_eq!(
            fix_duplicates_prompt(&summary, &plan),
            "Renumber 2 products in benches to clear 1 duplicate orders?"
        );
    }

    #[test]
    fn test_organize_prompt() {
        let products = vec![
            product("a", None, 10),
            product("b", Some(3), 20),
            product("c", None, 30),
        ];
        let plan = ordering::plan_missing_order_repair(&products, "benches");

        assert_eq!(
            organize_prompt("benches", &plan),
            "Assign orders 4 to 5 to 2 unordered products in benches?"
        );
    }

    #[test]
    fn test_format_duplicates() {
        let products = vec![
            product("b", Some(2), 20),
            product("a", Some(2), 10),
            product("c", Some(1), 30),
        ];

        assert_eq!(format_duplicates(&products, "benches"), vec!["#2 shared by a, b"]);
    }
}
