//! AX-012: Python library function with unittest tests.
//!
//! Produces `<name>.py` and `tests/test_<name>.py`. Recognized features get
//! a real implementation; anything else gets a documented pass-through stub.

use super::{docstring, fill};
use indexmap::IndexMap;
use std::collections::BTreeMap;

struct LibTemplate {
    module: &'static str,
    tests: &'static str,
}

/// Render the module and its tests, keyed by relative path.
pub fn render_func(
    name: &str,
    brief: &str,
    fields: &BTreeMap<String, String>,
) -> IndexMap<String, String> {
    let tpl = match fields.get("feature").map(String::as_str) {
        Some("factorial") => FACTORIAL,
        Some("fibonacci") => FIBONACCI,
        Some("palindrome") => PALINDROME,
        Some("reverse_string") => REVERSE_STRING,
        _ => GENERIC,
    };
    let vars: [(&str, &str); 2] = [("NAME", name), ("DOC", &docstring(brief))];

    let mut files = IndexMap::new();
    files.insert(module_path(name), fill(tpl.module, &vars));
    files.insert(
        test_path(name),
        format!("{}{}", TEST_PRELUDE, fill(tpl.tests, &vars)),
    );
    files
}

pub fn module_path(name: &str) -> String {
    format!("{}.py", name)
}

pub fn test_path(name: &str) -> String {
    format!("tests/test_{}.py", name)
}

/// Header for every generated test module; makes the module importable
/// when the tests run from the project directory.
const TEST_PRELUDE: &str = r#"import sys
import unittest
from pathlib import Path

sys.path.insert(0, str(Path(__file__).resolve().parent.parent))
"#;

const FACTORIAL: LibTemplate = LibTemplate {
    module: r#""""%%DOC%%"""

from functools import lru_cache

__all__ = ["factorial"]


@lru_cache(maxsize=None)
def factorial(n: int) -> int:
    """Return n! for a non-negative integer n."""
    if isinstance(n, bool) or not isinstance(n, int):
        raise TypeError("factorial() requires an int")
    if n < 0:
        raise ValueError("factorial() is undefined for negative numbers")
    result = 1
    for i in range(2, n + 1):
        result *= i
    return result
"#,
    tests: r#"
from %%NAME%% import factorial  # noqa: E402


class FactorialTests(unittest.TestCase):
    def test_base_cases(self):
        self.assertEqual(factorial(0), 1)
        self.assertEqual(factorial(1), 1)

    def test_small_numbers(self):
        self.assertEqual(factorial(5), 120)
        self.assertEqual(factorial(10), 3628800)

    def test_monotonic(self):
        values = [factorial(n) for n in range(12)]
        self.assertEqual(values, sorted(values))

    def test_negative_rejected(self):
        with self.assertRaises(ValueError):
            factorial(-1)

    def test_non_integer_rejected(self):
        with self.assertRaises(TypeError):
            factorial(2.5)


if __name__ == "__main__":
    unittest.main()
"#,
};

const FIBONACCI: LibTemplate = LibTemplate {
    module: r#""""%%DOC%%"""

from typing import Iterator

__all__ = ["fibonacci", "fibonacci_sequence"]


def fibonacci(n: int) -> int:
    """Return the n-th Fibonacci number (fibonacci(0) == 0)."""
    if isinstance(n, bool) or not isinstance(n, int):
        raise TypeError("fibonacci() requires an int")
    if n < 0:
        raise ValueError("fibonacci() is undefined for negative numbers")
    a, b = 0, 1
    for _ in range(n):
        a, b = b, a + b
    return a


def fibonacci_sequence(count: int) -> Iterator[int]:
    """Yield the first `count` Fibonacci numbers."""
    a, b = 0, 1
    for _ in range(max(count, 0)):
        yield a
        a, b = b, a + b
"#,
    tests: r#"
from %%NAME%% import fibonacci, fibonacci_sequence  # noqa: E402


class FibonacciTests(unittest.TestCase):
    def test_base_cases(self):
        self.assertEqual(fibonacci(0), 0)
        self.assertEqual(fibonacci(1), 1)

    def test_small_numbers(self):
        self.assertEqual(fibonacci(10), 55)
        self.assertEqual(fibonacci(20), 6765)

    def test_sequence(self):
        self.assertEqual(list(fibonacci_sequence(8)), [0, 1, 1, 2, 3, 5, 8, 13])
        self.assertEqual(list(fibonacci_sequence(0)), [])

    def test_negative_rejected(self):
        with self.assertRaises(ValueError):
            fibonacci(-3)


if __name__ == "__main__":
    unittest.main()
"#,
};

const PALINDROME: LibTemplate = LibTemplate {
    module: r#""""%%DOC%%"""

__all__ = ["is_palindrome"]


def is_palindrome(text: str) -> bool:
    """True when `text` reads the same backwards, ignoring case and punctuation."""
    cleaned = [c.lower() for c in text if c.isalnum()]
    return cleaned == cleaned[::-1]
"#,
    tests: r#"
from %%NAME%% import is_palindrome  # noqa: E402


class PalindromeTests(unittest.TestCase):
    def test_simple(self):
        self.assertTrue(is_palindrome("racecar"))
        self.assertFalse(is_palindrome("rust"))

    def test_ignores_case_and_punctuation(self):
        self.assertTrue(is_palindrome("A man, a plan, a canal: Panama"))

    def test_empty(self):
        self.assertTrue(is_palindrome(""))


if __name__ == "__main__":
    unittest.main()
"#,
};

const REVERSE_STRING: LibTemplate = LibTemplate {
    module: r#""""%%DOC%%"""

__all__ = ["reverse_string", "reverse_words"]


def reverse_string(text: str) -> str:
    """Return `text` with its characters in reverse order."""
    return text[::-1]


def reverse_words(text: str) -> str:
    """Return `text` with its whitespace-separated words in reverse order."""
    return " ".join(reversed(text.split()))
"#,
    tests: r#"
from %%NAME%% import reverse_string, reverse_words  # noqa: E402


class ReverseTests(unittest.TestCase):
    def test_reverse_string(self):
        self.assertEqual(reverse_string("abc"), "cba")
        self.assertEqual(reverse_string(""), "")

    def test_involution(self):
        for text in ("hello", "a b c", "ünïcödé"):
            self.assertEqual(reverse_string(reverse_string(text)), text)

    def test_reverse_words(self):
        self.assertEqual(reverse_words("one two  three"), "three two one")


if __name__ == "__main__":
    unittest.main()
"#,
};

const GENERIC: LibTemplate = LibTemplate {
    module: r#""""%%DOC%%"""

from typing import Any

__all__ = ["%%NAME%%"]


def %%NAME%%(value: Any) -> Any:
    """%%DOC%%

    Generated scaffold: returns its input unchanged until implemented.
    """
    return value
"#,
    tests: r#"
from %%NAME%% import %%NAME%%  # noqa: E402


class ScaffoldTests(unittest.TestCase):
    def test_callable(self):
        self.assertTrue(callable(%%NAME%%))

    def test_passthrough(self):
        self.assertEqual(%%NAME%%(42), 42)


if __name__ == "__main__":
    unittest.main()
"#,
};
