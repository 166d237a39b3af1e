//! Bracket balance check on the raw expression. Only '(' and ')' are looked at; every other
//! character is ignored.

/// Returns true if every '(' is closed by a later ')' and no ')' appears without an open '('.
pub fn is_balanced(source: &str) -> bool {
    unbalanced_column(source).is_none()
}

/// Finds the 1-based column of the first offending parenthesis: a ')' with nothing open, or,
/// if the scan ends with open brackets, the innermost one still open.
pub fn unbalanced_column(source: &str) -> Option<usize> {
    let mut stack = Vec::<usize>::new();

    for (index, c) in source.chars().enumerate() {
        match c {
            '(' => stack.push(index + 1),
            ')' => {
                if stack.pop().is_none() {
                    return Some(index + 1)
                }
            }
            _ => {}
        }
    }
    stack.pop()
}
