use core::fmt;
use core::ops::Deref;

use std::collections::HashMap;
use std::sync::RwLock;

lazy_static::lazy_static! {
    static ref SYMBOL_TABLE: SymbolTable = SymbolTable::new();
}

/// A symbol is an interned string.
///
/// Declaration names, type paths and import paths are all interned, which makes
/// them `Copy` and cheap to use as graph nodes and set members.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Maps a string to its interned representation.
    pub fn intern<S: AsRef<str>>(string: S) -> Self {
        SYMBOL_TABLE.intern(string.as_ref())
    }

    pub fn as_str(self) -> &'static str {
        SYMBOL_TABLE.get(self)
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}
impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self, self.0)
    }
}
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}
impl<T: Deref<Target = str>> PartialEq<T> for Symbol {
    fn eq(&self, other: &T) -> bool {
        self.as_str() == other.deref()
    }
}
impl From<&str> for Symbol {
    #[inline]
    fn from(s: &str) -> Self {
        Self::intern(s)
    }
}

struct SymbolTable {
    interner: RwLock<Interner>,
}
impl SymbolTable {
    fn new() -> Self {
        Self {
            interner: RwLock::new(Interner::default()),
        }
    }

    fn intern(&self, string: &str) -> Symbol {
        {
            let interner = self.interner.read().unwrap_or_else(|err| err.into_inner());
            if let Some(symbol) = interner.names.get(string) {
                return *symbol;
            }
        }
        let mut interner = self.interner.write().unwrap_or_else(|err| err.into_inner());
        interner.insert(string)
    }

    fn get(&self, symbol: Symbol) -> &'static str {
        let interner = self.interner.read().unwrap_or_else(|err| err.into_inner());
        interner.strings[symbol.0 as usize]
    }
}

/// Interned strings are leaked, they live for the remainder of the process.
#[derive(Default)]
struct Interner {
    names: HashMap<&'static str, Symbol>,
    strings: Vec<&'static str>,
}
impl Interner {
    fn insert(&mut self, string: &str) -> Symbol {
        // Another writer may have won the race between our read and write locks
        if let Some(symbol) = self.names.get(string) {
            return *symbol;
        }
        let symbol = Symbol(self.strings.len() as u32);
        let string: &'static str = Box::leak(string.to_string().into_boxed_str());
        self.strings.push(string);
        self.names.insert(string, symbol);
        symbol
    }
}
