//! Predefined identifier groups for `#declare :group`.

/// ECMAScript globals, plus `arguments`.
const STANDARD: &[&str] = &[
    "arguments",
    "Array",
    "Boolean",
    "Date",
    "decodeURI",
    "decodeURIComponent",
    "encodeURI",
    "encodeURIComponent",
    "Error",
    "eval",
    "EvalError",
    "Function",
    "hasOwnProperty",
    "isFinite",
    "isNaN",
    "JSON",
    "Math",
    "Number",
    "Object",
    "parseInt",
    "parseFloat",
    "RangeError",
    "ReferenceError",
    "RegExp",
    "String",
    "SyntaxError",
    "TypeError",
    "URIError",
];

/// Node.js globals on top of the standard set.
const NODE: &[&str] = &[
    "__filename",
    "__dirname",
    "Buffer",
    "console",
    "exports",
    "GLOBAL",
    "global",
    "module",
    "process",
    "require",
    "setTimeout",
    "clearTimeout",
    "setInterval",
    "clearInterval",
];

/// Browser and DOM globals on top of the standard set.
const BROWSER: &[&str] = &[
    "ArrayBuffer",
    "ArrayBufferView",
    "Audio",
    "addEventListener",
    "applicationCache",
    "blur",
    "clearInterval",
    "clearTimeout",
    "close",
    "closed",
    "DataView",
    "defaultStatus",
    "document",
    "event",
    "FileReader",
    "Float32Array",
    "Float64Array",
    "FormData",
    "focus",
    "frames",
    "getComputedStyle",
    "HTMLElement",
    "HTMLAnchorElement",
    "HTMLBaseElement",
    "HTMLBlockquoteElement",
    "HTMLBodyElement",
    "HTMLBRElement",
    "HTMLButtonElement",
    "HTMLCanvasElement",
    "HTMLDirectoryElement",
    "HTMLDivElement",
    "HTMLDListElement",
    "HTMLFieldSetElement",
    "HTMLFontElement",
    "HTMLFormElement",
    "HTMLFrameElement",
    "HTMLFrameSetElement",
    "HTMLHeadElement",
    "HTMLHeadingElement",
    "HTMLHRElement",
    "HTMLHtmlElement",
    "HTMLIFrameElement",
    "HTMLImageElement",
    "HTMLInputElement",
    "HTMLIsIndexElement",
    "HTMLLabelElement",
    "HTMLLayerElement",
    "HTMLLegendElement",
    "HTMLLIElement",
    "HTMLLinkElement",
    "HTMLMapElement",
    "HTMLMenuElement",
    "HTMLMetaElement",
    "HTMLModElement",
    "HTMLObjectElement",
    "HTMLOListElement",
    "HTMLOptGroupElement",
    "HTMLOptionElement",
    "HTMLParagraphElement",
    "HTMLParamElement",
    "HTMLPreElement",
    "HTMLQuoteElement",
    "HTMLScriptElement",
    "HTMLSelectElement",
    "HTMLStyleElement",
    "HTMLTableCaptionElement",
    "HTMLTableCellElement",
    "HTMLTableColElement",
    "HTMLTableElement",
    "HTMLTableRowElement",
    "HTMLTableSectionElement",
    "HTMLTextAreaElement",
    "HTMLTitleElement",
    "HTMLUListElement",
    "HTMLVideoElement",
    "history",
    "Int16Array",
    "Int32Array",
    "Int8Array",
    "Image",
    "length",
    "localStorage",
    "location",
    "moveBy",
    "moveTo",
    "name",
    "navigator",
    "onbeforeunload",
    "onblur",
    "onerror",
    "onfocus",
    "onload",
    "onresize",
    "onunload",
    "open",
    "openDatabase",
    "opener",
    "Option",
    "parent",
    "print",
    "removeEventListener",
    "resizeBy",
    "resizeTo",
    "screen",
    "scroll",
    "scrollBy",
    "scrollTo",
    "sessionStorage",
    "setInterval",
    "setTimeout",
    "SharedWorker",
    "status",
    "top",
    "Uint16Array",
    "Uint32Array",
    "Uint8Array",
    "WebSocket",
    "window",
    "Worker",
    "XMLHttpRequest",
    "XPathEvaluator",
    "XPathException",
    "XPathExpression",
    "XPathNamespace",
    "XPathNSResolver",
    "XPathResult",
];

/// The names a `#declare :group` tag expands to, or `None` for an unknown
/// group. `group` is given without its leading colon.
pub fn declare_group(group: &str) -> Option<impl Iterator<Item = &'static str>> {
    let extra: &[&str] = match group {
        "standard" => &[],
        "node" => NODE,
        "browser" => BROWSER,
        _ => return None,
    };
    Some(STANDARD.iter().chain(extra).copied())
}
