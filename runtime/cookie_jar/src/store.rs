use indexmap::IndexMap;

/// The current known value of each cookie, keyed by name.
///
/// It's seeded from the incoming `Cookie` header and then mirrors every directive
/// the jar emits. No validation happens here.
#[derive(Debug, Default, Clone)]
pub(crate) struct CookieStore {
    cookies: IndexMap<String, String>,
}

impl CookieStore {
    /// Bulk insert. Later pairs overwrite earlier ones.
    pub(crate) fn load<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.cookies.extend(pairs);
    }

    pub(crate) fn read(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub(crate) fn write(&mut self, name: String, value: String) {
        self.cookies.insert(name, value);
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    /// Returns `true` if there was an entry to remove.
    pub(crate) fn remove(&mut self, name: &str) -> bool {
        self.cookies.shift_remove(name).is_some()
    }

    /// Names in insertion order.
    pub(crate) fn names(&self) -> Vec<String> {
        self.cookies.keys().cloned().collect()
    }
}
