//! Single-crawler views: the details panel and the configuration form

use crate::fleet::{CrawlerEdit, CrawlerInstance, EditField};
use crate::output::{format_data_size, format_usage, status_label};
use crate::state::{PauseAffordance, RunState};
use std::fmt::Write;

/// Renders everything known about one crawler
pub fn format_details(crawler: &CrawlerInstance) -> String {
    let mut out = String::new();
    let run_state = RunState::of(crawler);

    let _ = writeln!(out, "=== {} ({}) ===", crawler.name, crawler.id);
    let unrecognized = if crawler.status.is_known() {
        ""
    } else {
        " (unrecognized)"
    };
    let _ = writeln!(
        out,
        "Status:        {}{}",
        status_label(&crawler.status),
        unrecognized
    );
    let _ = writeln!(out, "Run state:     {}", run_state);
    let _ = writeln!(out);

    let _ = writeln!(out, "Target:");
    let _ = writeln!(out, "  City:        {}", crawler.cidade);
    if let Some(location) = &crawler.location {
        let _ = writeln!(out, "  Location:    {}", location);
    }
    let _ = writeln!(out, "  City code:   {}", crawler.codigo_municipio);
    let _ = writeln!(
        out,
        "  Entity:      {} ({})",
        crawler.nome_entidade, crawler.codigo_entidade
    );
    let _ = writeln!(out, "  Year:        {}", crawler.ano);
    let _ = writeln!(out);

    let _ = writeln!(out, "Progress:");
    let _ = writeln!(
        out,
        "  Page range:  {}..={} ({} pages)",
        crawler.pagina_inicial,
        crawler.pagina_final,
        crawler.pages_total()
    );
    let _ = writeln!(out, "  Current:     {}", crawler.pagina_atual);
    let blocked = if crawler.is_blocked() {
        " (end of range reached)"
    } else {
        ""
    };
    let _ = writeln!(out, "  Remaining:   {}{}", crawler.pages_remaining(), blocked);
    let _ = writeln!(out, "  Data:        {}", format_data_size(crawler.data));
    let _ = writeln!(out, "  CPU:         {}", format_usage(crawler.cpu));
    let _ = writeln!(out, "  RAM:         {}", format_usage(crawler.memory));
    let _ = writeln!(out);

    let _ = writeln!(out, "Actions:");
    let _ = writeln!(out, "  {}", PauseAffordance::of(crawler).label());
    let _ = writeln!(out, "  Configure");
    if run_state.can_archive() {
        let _ = writeln!(out, "  Generate archive");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Consolidated files ({}):", crawler.file_count());
    for file in &crawler.files_consolidateds {
        let _ = writeln!(out, "  - {}", file.display_name());
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Pages ({} processed, {} failed):",
        crawler.paginas.len(),
        crawler.failed_pages()
    );
    for page in &crawler.paginas {
        let mark = if page.succeeded() { "✓" } else { "✗" };
        let _ = writeln!(out, "  {} {}", mark, page.id);
    }

    out
}

/// Renders the contents of the configuration form
pub fn format_edit_form(edit: &CrawlerEdit) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Configuration for crawler {}:", edit.id);
    for field in EditField::ALL {
        let kind = if field.is_numeric() { "int" } else { "text" };
        let _ = writeln!(out, "  {:<20} [{:<4}] {}", field.key(), kind, edit.get(field));
    }
    out
}
