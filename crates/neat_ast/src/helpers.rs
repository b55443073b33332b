//! Runtime helper functions that `#include` can pull into the output.
//!
//! Each body starts with a newline and is appended verbatim after the
//! rendered program, once per included name.

/// Known helpers, by name.
pub const HELPERS: &[(&str, &str)] = &[
    ("undef", UNDEF),
    ("nada", NADA),
    ("trycatch", TRYCATCH),
    ("extend", EXTEND),
    ("each", EACH),
    ("filter", FILTER),
    ("map", MAP),
    ("once", ONCE),
    ("keys", KEYS),
];

/// The body of the helper called `name`, if there is one.
pub fn helper_source(name: &str) -> Option<&'static str> {
    HELPERS
        .iter()
        .find(|(helper, _)| *helper == name)
        .map(|(_, source)| *source)
}

/// The static name of the helper called `name`, if there is one.
pub fn helper_name(name: &str) -> Option<&'static str> {
    HELPERS
        .iter()
        .find(|(helper, _)| *helper == name)
        .map(|(helper, _)| *helper)
}

const UNDEF: &str = "
function undef(x) {
\treturn typeof x === 'undefined';
}
";

const NADA: &str = "
function nada(x) {
\treturn x === null || typeof x === 'undefined';
}
";

const TRYCATCH: &str = "
function trycatch(fn, next) {
\ttry {
\t\tnext(null, fn());
\t}
\tcatch (err) {
\t\tnext(err);
\t}
}
";

const EXTEND: &str = "
function extend(base, methods) {
\tfunction ctor(){}
\tctor.prototype = base;
\tvar proto = new ctor(), k;
\tif (methods) {
\t\tfor (k in methods) {
\t\t\tif (methods.hasOwnProperty(k)) {
\t\t\t\tproto[k] = methods[k];
\t\t\t}
\t\t}
\t}
\treturn proto;
}
";

const EACH: &str = "
function each(ar, f) {
\tvar i;
\tfor (i = 0; i < ar.length; i++) {
\t\tf(ar[i], i);
\t}
}
";

const FILTER: &str = "
function filter(ar, f) {
\tvar i, j = 0, r = [];
\tfor (i = 0; i < ar.length; i++) {
\t\tif (f(ar[i], i)) {
\t\t\tr[j++] = ar[i];
\t\t}
\t}
\treturn r;
}
";

const MAP: &str = "
function map(ar, f) {
\tvar i, r = [];
\tfor (i = 0; i < ar.length; i++) {
\t\tr[i] = f(ar[i], i);
\t}
\treturn r;
}
";

const ONCE: &str = "
function once(f) {
\tvar called = false;
\treturn function() {
\t\tif (!called) {
\t\t\tcalled = true;
\t\t\treturn f.apply(this, arguments);
\t\t}
\t};
}
";

const KEYS: &str = "
function keys(o) {
\tvar r = [], k;
\tfor (k in o) {
\t\tif (o.hasOwnProperty(k)) {
\t\t\tr.push(k);
\t\t}
\t}
\treturn r;
}
";
