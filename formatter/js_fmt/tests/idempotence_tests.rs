#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Idempotence verification.
//!
//! The layout rules are deterministic and reach a fixed point: formatting
//! an already-formatted output a second time must be byte-identical.

use js_fmt::format;
use pretty_assertions::assert_eq;

const SOURCES: &[&str] = &[
    ";",
    "a();b();",
    "var a=1,b=2;",
    "if(a)b();",
    "if(a){b();}else{c();}",
    "if(a)b();else c();",
    "if(a){b();}else if(c){d();}else{e();}",
    "while(a){b();}",
    "do{a();}while(b);",
    "do a();while(b);",
    "for(var i=0;i<n;++i){a(i);}",
    "for(;;)a();",
    "for(var k in o)f(k);",
    "switch(a){case 1:b();break;default:c();}",
    "try{a();}catch(e){b();}finally{c();}",
    "with(o)f();",
    "throw new E('x');",
    "function f(a,b){return a+b;}",
    "var f=function(){return 1;};",
    "(function(){})();",
    "return\nfoo();",
    "({get x(){return 1}})",
    "({set x(v){this._x=v}})",
    "a={x:1,y:{z:2}};",
    "a=[1,,2,[3,4]];",
    "a=b?c:d?e:f;",
    "a=1,b=2;",
    "a=b/c/d;",
    "a=/b+/g.test(s);",
    "delete a.b;",
    "a.b[c](d).e(f)[g];",
    "loop1:for(;;)break loop1;",
    "// note\nfoo();",
    "foo(); // hi\nbar();",
    "/* a\n   b */\nfoo();",
    "if(a){\n// why\nb();\n}",
    "a();\n\n\nb();",
    "function outer(){function inner(){if(x){y();}}}",
    "a='x  y'+\"z\";",
    "debugger;",
];

#[test]
fn format_reaches_a_fixed_point() {
    for source in SOURCES {
        let once = format(source)
            .unwrap_or_else(|err| panic!("first pass failed on {source:?}: {err}"))
            .text;
        let twice = format(&once)
            .unwrap_or_else(|err| panic!("second pass failed on {once:?}: {err}"))
            .text;
        assert_eq!(twice, once, "not idempotent for {source:?}");
    }
}

#[test]
fn formatted_output_strips_to_same_tokens() {
    // Whitespace-stripped equality: the transform only touches
    // inter-token spacing, never token content.
    for source in SOURCES {
        let formatted = format(source)
            .unwrap_or_else(|err| panic!("format failed on {source:?}: {err}"))
            .text;
        assert_eq!(
            strip_whitespace(&formatted),
            strip_whitespace(source),
            "token text diverged for {source:?}"
        );
    }
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
