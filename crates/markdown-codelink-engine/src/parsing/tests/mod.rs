//! Block building tests over whole documents.
//!
//! Documents are rendered through `snapshot::normalize` and compared with
//! inline snapshots; every parse is also run through the invariant checks.

use pretty_assertions::assert_eq;
use xi_rope::Rope;

use crate::io::InMemoryAccessor;
use crate::parsing::{
    ParsedDoc,
    blocks::{BlockKind, BlockParsers, kinds::{CodeFenceParser, CodeLinkSettings}},
    parse_document, parse_document_with, parse_document_with_settings, snapshot,
};

const PROGRAM: &str = "class Program\n{\n    #region main\n    static void Main() {}\n    #endregion\n}\n";

fn accessor() -> InMemoryAccessor {
    InMemoryAccessor::new("/docs")
        .with_file("App.csproj", "<Project />")
        .with_file("Program.cs", PROGRAM)
}

fn parse(md: &str) -> (Rope, ParsedDoc) {
    let rope = Rope::from(md);
    let doc = parse_document(&rope, &accessor());
    snapshot::invariants(&rope, &doc.blocks);
    (rope, doc)
}

fn render(md: &str) -> String {
    let (rope, doc) = parse(md);
    snapshot::normalize(&rope, &doc.blocks).to_string()
}

#[test]
fn empty_document() {
    let (_, doc) = parse("");
    assert!(doc.blocks.is_empty());
}

#[test]
fn blank_lines_only() {
    let (_, doc) = parse("\n\n\n");
    assert!(doc.blocks.is_empty());
}

#[test]
fn region_replaces_body() {
    let md = "Intro\n```csharp Program.cs --region main\nignored\n```\n";
    insta::assert_snapshot!(render(md), @r"
    Paragraph 0..6
    CodeLink(Program.cs#main) 6..53
      |     static void Main() {}
    ");
}

#[test]
fn whole_file_replaces_body() {
    let md = "```csharp Program.cs\nignored\n```\n";
    insta::assert_snapshot!(render(md), @r"
    CodeLink(Program.cs) 0..33
      | class Program
      | {
      |     #region main
      |     static void Main() {}
      |     #endregion
      | }
    ");
}

#[test]
fn keyword_without_source_is_literal() {
    let md = "> ```csharp\n> var x = 1;\n> ```\n";
    insta::assert_snapshot!(render(md), @r"
    CodeLink 0..31 [Quote(1)]
      | var x = 1;
    ");
}

#[test]
fn unterminated_block_runs_to_end_of_document() {
    let md = "```csharp Missing.cs\nbody\n";
    insta::assert_snapshot!(render(md), @r"
    CodeLink(Missing.cs) 0..26
      | body
      ! File not found: Missing.cs
    ");
}

#[test]
fn opening_indentation_is_removed_from_body() {
    let md = "  ```\n    x\n  ```\n";
    insta::assert_snapshot!(render(md), @r"
    FencedCode(Backticks) 0..18
      |   x
    ");
}

#[test]
fn other_languages_are_plain_code() {
    let (_, doc) = parse("```ruby Program.cs\nputs 1\n```\n");
    assert_eq!(doc.blocks.len(), 1);
    match &doc.blocks[0].kind {
        BlockKind::FencedCode(block) => {
            assert_eq!(block.info, "ruby Program.cs");
            assert_eq!(block.lines, vec!["puts 1"]);
        }
        other => panic!("expected plain code block, got {other:?}"),
    }
}

#[test]
fn tilde_fences_are_never_code_links() {
    let (_, doc) = parse("~~~csharp Program.cs\nbody\n~~~\n");
    assert_eq!(doc.code_links().count(), 0);
    assert!(matches!(doc.blocks[0].kind, BlockKind::FencedCode(_)));
}

#[test]
fn shorter_fence_inside_does_not_close() {
    let md = "````csharp\n```\ninner\n````\nafter\n";
    let (_, doc) = parse(md);
    assert_eq!(doc.blocks.len(), 2);

    let block = doc.blocks[0].as_code_link().unwrap();
    assert_eq!(block.lines(), ["```", "inner"]);
    assert!(matches!(doc.blocks[1].kind, BlockKind::Paragraph));
}

#[test]
fn fences_inside_linked_block_are_discarded() {
    let md = "```csharp Program.cs --region main\n~~~\n```\n";
    let (_, doc) = parse(md);
    let block = doc.blocks[0].as_code_link().unwrap();
    assert_eq!(block.lines(), ["    static void Main() {}"]);
}

#[test]
fn blank_lines_stay_inside_fences() {
    let (_, doc) = parse("```csharp\na\n\nb\n```\n");
    assert_eq!(doc.blocks.len(), 1);
    assert_eq!(doc.blocks[0].as_code_link().unwrap().lines(), ["a", "", "b"]);
}

#[test]
fn code_links_in_document_order() {
    let md = "```csharp Program.cs\n```\n\ntext\n\n```csharp Missing.cs\n```\n";
    let (_, doc) = parse(md);
    let sources: Vec<_> = doc
        .code_links()
        .map(|block| block.source_file().unwrap().to_string())
        .collect();
    assert_eq!(sources, vec!["Program.cs", "Missing.cs"]);
}

#[test]
fn custom_keyword() {
    let rope = Rope::from("```fsharp Program.cs\n```\n```csharp Program.cs\n```\n");
    let settings = CodeLinkSettings {
        keyword: "fsharp".to_string(),
        project_extension: "csproj".to_string(),
    };
    let doc = parse_document_with_settings(&rope, &accessor(), settings);

    assert!(doc.blocks[0].as_code_link().is_some());
    assert!(matches!(doc.blocks[1].kind, BlockKind::FencedCode(_)));
}

#[test]
fn registry_without_code_link_parser() {
    let rope = Rope::from("```csharp Program.cs\nbody\n```\n");
    let parsers = BlockParsers::new().with(CodeFenceParser);
    let doc = parse_document_with(&rope, &parsers);

    assert_eq!(doc.code_links().count(), 0);
    assert_eq!(doc.blocks.len(), 1);
}

#[test]
fn block_spans_slice_back_to_source() {
    let md = "para\n\n```csharp Program.cs\nx\n```\n";
    let (rope, doc) = parse(md);
    let texts: Vec<_> = doc
        .blocks
        .iter()
        .map(|b| b.span.text(&rope).into_owned())
        .collect();
    assert_eq!(texts, vec!["para\n", "```csharp Program.cs\nx\n```\n"]);
}

#[test]
fn blocks_record_their_first_line() {
    let md = "one\ntwo\n\n```csharp\nx\n```\nthree\n";
    let (_, doc) = parse(md);
    let lines: Vec<_> = doc.blocks.iter().map(|b| b.line).collect();
    assert_eq!(lines, vec![0, 3, 6]);
}

#[test]
fn quoted_fence_closes_when_quote_ends() {
    let md = "> ```csharp\n> x\n\nLater paragraph\n\n```csharp Program.cs\n```\n";
    insta::assert_snapshot!(render(md), @r"
    CodeLink 0..16 [Quote(1)]
      | x
    Paragraph 17..33
    CodeLink(Program.cs) 34..59
      | class Program
      | {
      |     #region main
      |     static void Main() {}
      |     #endregion
      | }
    ");
}

#[test]
fn deeper_quote_markers_inside_quoted_fence_are_content() {
    let (_, doc) = parse("> ```csharp\n> > nested\n> ```\n");
    assert_eq!(doc.blocks.len(), 1);
    assert_eq!(doc.blocks[0].as_code_link().unwrap().lines(), ["> nested"]);
}

#[test]
fn quoted_paragraph_keeps_its_quote_after_blank_line() {
    let md = "> quoted\n\nplain\n";
    insta::assert_snapshot!(render(md), @r"
    Paragraph 0..9 [Quote(1)]
    Paragraph 10..16
    ");
}

#[test]
fn lazy_line_continues_quoted_paragraph() {
    let md = "> quoted\nlazy\n";
    insta::assert_snapshot!(render(md), @"Paragraph 0..14 [Quote(1)]");
}

#[test]
fn quote_interrupts_paragraph() {
    let md = "text\n> quote\n";
    insta::assert_snapshot!(render(md), @r"
    Paragraph 0..5
    Paragraph 5..13 [Quote(1)]
    ");
}

#[test]
fn tab_wider_than_fence_indent_keeps_its_extra_columns() {
    let (_, doc) = parse("  ```\n\tx\n  ```\n");
    match &doc.blocks[0].kind {
        BlockKind::FencedCode(block) => assert_eq!(block.lines, vec!["  x"]),
        other => panic!("expected plain code block, got {other:?}"),
    }
}
