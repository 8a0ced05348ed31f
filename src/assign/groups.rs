use indexmap::IndexMap;

use super::selector::select_users;

/// Run the selector independently against each named group and concatenate
/// the results in the mapping's insertion order.
///
/// Groups are not deduplicated against each other: a user listed in two
/// groups can be selected once per group. That matches the long-standing
/// behavior of group-based assignment and is intentional.
pub fn select_users_from_groups(
    key: u64,
    excluded_user: &str,
    groups: &IndexMap<String, Vec<String>>,
    per_group_count: usize,
) -> Vec<String> {
    let mut users = Vec::new();
    for members in groups.values() {
        users.extend(select_users(key, members, per_group_count, excluded_user));
    }
    users
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(entries: &[(&str, &[&str])]) -> IndexMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(name, members)| {
                (
                    name.to_string(),
                    members.iter().map(|m| m.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_concatenates_in_insertion_order() {
        let groups = groups(&[
            ("backend", &["a", "b", "c", "d"][..]),
            ("frontend", &["e", "f", "g", "h"][..]),
        ]);
        // key 7, count 2 per group: backend picks d then c, frontend likewise
        let result = select_users_from_groups(7, "", &groups, 2);
        assert_eq!(result, vec!["d", "c", "h", "g"]);
    }

    #[test]
    fn test_output_length_is_sum_of_group_selections() {
        let groups = groups(&[
            ("one", &["a", "b", "c"][..]),
            ("two", &["d"][..]),
            ("three", &["e", "f"][..]),
        ]);
        let result = select_users_from_groups(11, "", &groups, 2);
        assert_eq!(result.len(), 2 + 1 + 2);
    }

    #[test]
    fn test_excluded_user_filtered_per_group() {
        let groups = groups(&[("one", &["a", "b"][..]), ("two", &["a", "c"][..])]);
        let result = select_users_from_groups(3, "a", &groups, 0);
        assert_eq!(result, vec!["b", "c"]);
    }

    #[test]
    fn test_cross_group_duplicates_are_kept() {
        let groups = groups(&[("one", &["a"][..]), ("two", &["a"][..])]);
        let result = select_users_from_groups(1, "", &groups, 1);
        assert_eq!(result, vec!["a", "a"]);
    }

    #[test]
    fn test_empty_mapping_yields_empty() {
        let groups = IndexMap::new();
        assert!(select_users_from_groups(9, "", &groups, 2).is_empty());
    }
}
