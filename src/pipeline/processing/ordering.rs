use tracing::debug;

use crate::types::ResolvedRecipient;

/// A recipient is a child when no original account label contains the
/// leading token of its name.
pub fn is_child(name: &str, account_labels: &[String]) -> bool {
    let leading = name.split_whitespace().next().unwrap_or("");
    !account_labels.iter().any(|label| label.contains(leading))
}

/// Stable sort: children last; among the rest, blank merged email last.
pub fn order_recipients(recipients: Vec<ResolvedRecipient>, account_labels: &[String]) -> Vec<ResolvedRecipient> {
    let mut keyed: Vec<((bool, bool), ResolvedRecipient)> = recipients
        .into_iter()
        .map(|r| {
            let child = is_child(&r.name, account_labels);
            ((child, !child && !r.has_email()), r)
        })
        .collect();
    keyed.sort_by_key(|(key, _)| *key);

    debug!(
        "Ordered {} recipients ({} children)",
        keyed.len(),
        keyed.iter().filter(|((child, _), _)| *child).count()
    );
    keyed.into_iter().map(|(_, r)| r).collect()
}
