//! Direct use of the generic `reverse_hash` contract
//!
//! Inverts h(s) = fold(s, 0, |acc, c| (acc * 3 + value(c)) * 5) over the
//! alphabet {a, b} without going through configuration files.

use fold_hash_reverse::reverse::reverse_hash;

fn value(token: &str) -> i64 {
    if token == "a" {
        1
    } else {
        2
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let alphabet = vec!["a".to_string(), "b".to_string()];

    let reversed = |token: &str, state: &i64| (*state / 5 - value(token)) / 3;
    let check = |token: &str, state: &i64| {
        if *state % 5 == 0 {
            *state / 5 - value(token)
        } else {
            -1
        }
    };
    let accept = |state: &i64| *state % 3 == 0;

    // 1205 = h("aaa"), 85 = h("ab"), 7 is unreachable.
    for terminal in [1205i64, 85, 7] {
        let preimages = reverse_hash(&alphabet, reversed, check, accept, terminal, 0, 4)?;
        println!("Preimages of {} (length <= 4): {:?}", terminal, preimages);
    }

    Ok(())
}
