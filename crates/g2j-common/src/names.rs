//! Well-known class names and the Java reserved word table.

// =============================================================================
// java.lang / java.util / java.math
// =============================================================================

pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";
pub const JAVA_LANG_STRING: &str = "java.lang.String";
pub const JAVA_UTIL_MAP: &str = "java.util.Map";
pub const JAVA_UTIL_HASH_MAP: &str = "java.util.HashMap";
pub const JAVA_UTIL_LINKED_HASH_MAP: &str = "java.util.LinkedHashMap";
pub const JAVA_UTIL_LIST: &str = "java.util.List";
pub const JAVA_UTIL_ARRAY_LIST: &str = "java.util.ArrayList";
pub const JAVA_UTIL_LINKED_HASH_SET: &str = "java.util.LinkedHashSet";
pub const JAVA_MATH_BIG_INTEGER: &str = "java.math.BigInteger";
pub const JAVA_MATH_BIG_DECIMAL: &str = "java.math.BigDecimal";

// =============================================================================
// Groovy runtime
// =============================================================================

pub const GROOVY_LANG_OBJECT_RANGE: &str = "groovy.lang.ObjectRange";
pub const GROOVY_LANG_INT_RANGE: &str = "groovy.lang.IntRange";
pub const DEFAULT_GROOVY_METHODS: &str = "org.codehaus.groovy.runtime.DefaultGroovyMethods";

const MAP_CLASSES: &[&str] = &[
    JAVA_UTIL_MAP,
    JAVA_UTIL_HASH_MAP,
    JAVA_UTIL_LINKED_HASH_MAP,
    "java.util.SortedMap",
    "java.util.TreeMap",
];

/// Interfaces a collection literal may be typed as, with the class
/// instantiated for them.
const COLLECTION_IMPLEMENTATIONS: &[(&str, &str)] = &[
    ("java.lang.Iterable", JAVA_UTIL_ARRAY_LIST),
    ("java.util.Collection", JAVA_UTIL_ARRAY_LIST),
    (JAVA_UTIL_LIST, JAVA_UTIL_ARRAY_LIST),
    ("java.util.Set", JAVA_UTIL_LINKED_HASH_SET),
    ("java.util.SortedSet", "java.util.TreeSet"),
    (JAVA_UTIL_MAP, JAVA_UTIL_LINKED_HASH_MAP),
    ("java.util.SortedMap", "java.util.TreeMap"),
];

/// Collection classes with an `(int initialCapacity)` constructor.
const CAPACITY_CONSTRUCTORS: &[&str] = &[
    JAVA_UTIL_ARRAY_LIST,
    JAVA_UTIL_HASH_MAP,
    JAVA_UTIL_LINKED_HASH_MAP,
    "java.util.HashSet",
    JAVA_UTIL_LINKED_HASH_SET,
    "java.util.Vector",
];

const JAVA_KEYWORDS: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "var",
    "void",
    "volatile",
    "while",
];

pub fn is_map_class(name: &str) -> bool {
    MAP_CLASSES.contains(&name)
}

pub fn is_java_keyword(name: &str) -> bool {
    JAVA_KEYWORDS.contains(&name)
}

/// `java.util.Map$Entry` gives `Entry`, `pkg.Outer.Inner` gives `Inner`.
pub fn simple_name(qualified: &str) -> &str {
    qualified
        .rsplit(['.', '$'])
        .next()
        .unwrap_or(qualified)
}

/// The class to instantiate for a collection literal typed as `name`.
/// Concrete classes map to themselves.
pub fn instantiable_collection(name: &str) -> &str {
    COLLECTION_IMPLEMENTATIONS
        .iter()
        .find(|(interface, _)| *interface == name)
        .map_or(name, |(_, class)| class)
}

pub fn has_capacity_constructor(name: &str) -> bool {
    CAPACITY_CONSTRUCTORS.contains(&name)
}
