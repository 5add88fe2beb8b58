// Shared prompt utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it;
// this file holds the slot-filling routine they all render through.

/// Fills `{slot}` placeholders in `template` from `slots` in a single pass.
///
/// Only placeholders that appear in the template itself are substituted, so
/// brace-delimited text inside a slot value (a CV quoting `{job_description}`,
/// say) is copied through verbatim. Unknown placeholders are left untouched.
pub fn fill_template(template: &str, slots: &[(&str, &str)]) -> String {
    let extra: usize = slots.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replaced = after.find('}').and_then(|close| {
            let name = &after[..close];
            slots
                .iter()
                .find(|(slot, _)| *slot == name)
                .map(|(_, value)| (close, *value))
        });

        match replaced {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
