//! Server-rendered HTML views.
//!
//! Pages are assembled with `format!`; every piece of user-supplied text goes
//! through [`esc`] first.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use wbo7_core::{
  bet::{BetNumber, BetRegistration},
  winner::WinnerRow,
};

const BOOTSTRAP: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css";

const NAV: [(&str, &str); 4] = [
  ("/", "Home"),
  ("/entrar", "Cadastrar Palpite"),
  ("/ganhadores", "Registros de Apostas"),
  ("/numeros_sorteados", "Números Sorteados"),
];

const TABLE_STYLE: &str = r#"
  <style>
    .table-container { max-height: 400px; overflow-y: auto; overflow-x: auto;
      border: 4px solid black; border-radius: 30px;
      box-shadow: 5px 5px 15px rgba(0, 0, 0, 0.6); padding: 15px; }
    .table-container::-webkit-scrollbar { width: 8px; height: 8px; }
    .table-container::-webkit-scrollbar-thumb { background-color: #6c757d; border-radius: 4px; }
    .table-container::-webkit-scrollbar-track { background-color: #f1f1f1; }
  </style>"#;

/// HTML-escape `text`.
pub fn esc(text: &str) -> Cow<'_, str> { quick_xml::escape::escape(text) }

pub fn format_dt(dt: DateTime<Utc>) -> String {
  dt.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn layout(title: &str, head_extra: &str, body: &str) -> String {
  let nav: String = NAV
    .iter()
    .map(|(href, label)| {
      format!(
        r#"<li class="nav-item"><a href="{href}" class="nav-link text-white">{label}</a></li>"#
      )
    })
    .collect();

  format!(
    r#"<!DOCTYPE html>
<html lang="pt-br">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title} - WBO7</title>
  <link rel="stylesheet" href="{BOOTSTRAP}">{head_extra}
</head>
<body>
  <header class="bg-dark text-white p-4">
    <div class="container d-flex justify-content-between">
      <h1>WBO7</h1>
      <nav><ul class="nav">{nav}</ul></nav>
    </div>
  </header>
{body}
</body>
</html>
"#
  )
}

fn table(headers: &[&str], rows: impl Iterator<Item = Vec<String>>) -> String {
  let head: String = headers.iter().map(|h| format!("<th>{h}</th>")).collect();
  let body: String = rows
    .map(|cells| {
      let tds: String = cells.iter().map(|c| format!("<td>{}</td>", esc(c))).collect();
      format!("<tr>{tds}</tr>")
    })
    .collect();
  format!(
    r#"<div class="table-container"><table class="table table-striped"><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table></div>"#
  )
}

// ─── Pages ───────────────────────────────────────────────────────────────────

/// `GET /` — the draw trigger.
pub fn home() -> String {
  layout(
    "Home",
    "",
    r#"  <main class="container my-5 text-center">
    <h2>Sorteio Online</h2>
    <button class="btn btn-success mt-3" onclick="realizarSorteio()">Sortear</button>
    <h2 class="mt-4">Resultado:</h2>
    <p id="resultado" class="fs-4"></p>
  </main>
  <script>
    async function realizarSorteio() {
      try {
        const response = await fetch('/sortear', { method: 'POST' });
        const data = await response.json();
        if (!response.ok) { alert(data.message); return; }
        alert(data.mensagem);
        document.getElementById('resultado').textContent = `Número sorteado: ${data.numero_sorteado}`;
      } catch (error) {
        console.error('Erro ao realizar o sorteio:', error);
      }
    }
  </script>"#,
  )
}

/// `GET /entrar` — the registration form.
pub fn register_form() -> String {
  let field = |id: &str, label: &str, kind: &str, extra: &str| {
    format!(
      r#"      <div class="mb-3">
        <label for="{id}" class="form-label">{label}</label>
        <input type="{kind}" class="form-control" id="{id}" required{extra}>
      </div>
"#
    )
  };
  let fields = [
    field("nome", "Nome Completo", "text", ""),
    field("cpf", "CPF", "text", ""),
    field("email", "E-mail", "email", ""),
    field("numeroAposta", "Número de Aposta", "number", r#" min="0" max="99""#),
  ]
  .concat();

  layout(
    "Cadastrar Palpite",
    "",
    &format!(
      r#"  <div class="container mt-5 p-4 text-white bg-dark rounded-4" style="max-width: 600px;">
    <h2 class="text-center">Cadastre seu Palpite</h2>
    <form id="formCadastro">
{fields}      <button type="submit" class="btn btn-outline-light w-100">Cadastrar</button>
    </form>
  </div>
  <script>
    document.getElementById('formCadastro').addEventListener('submit', async (event) => {{
      event.preventDefault();
      const value = (id) => document.getElementById(id).value;
      try {{
        const response = await fetch('/cadastrar', {{
          method: 'POST',
          headers: {{ 'Content-Type': 'application/json' }},
          body: JSON.stringify({{
            nome: value('nome'),
            cpf: value('cpf'),
            email: value('email'),
            numeroAposta: value('numeroAposta'),
          }})
        }});
        const data = await response.json();
        alert(data.message);
        if (response.ok) document.getElementById('formCadastro').reset();
      }} catch (error) {{
        console.error('Erro ao cadastrar:', error);
      }}
    }});
  </script>"#
    ),
  )
}

/// `GET /ganhadores` — every registration.
pub fn registrations(bets: &[BetRegistration]) -> String {
  let rows = bets.iter().map(|b| {
    vec![
      format_dt(b.registered_at),
      b.full_name.clone(),
      b.national_id.clone(),
      b.email.clone(),
      b.bet_number.to_string(),
    ]
  });

  layout(
    "Registros de Apostas",
    TABLE_STYLE,
    &format!(
      r#"  <div class="container mt-5">
    <h2 class="text-center">Lista de Apostas</h2>
    {}
  </div>"#,
      table(&["Data", "Nome", "CPF", "Email", "Número de Aposta"], rows)
    ),
  )
}

/// One line per draw: consecutive log rows sharing a draw time and number
/// came from the same draw.
pub fn draw_history(rows: &[WinnerRow]) -> Vec<(DateTime<Utc>, BetNumber)> {
  let mut draws: Vec<(DateTime<Utc>, BetNumber)> = Vec::new();
  for row in rows {
    let key = (row.drawn_at, row.bet_number);
    if draws.last() != Some(&key) {
      draws.push(key);
    }
  }
  draws
}

/// `GET /numeros_sorteados` — draw history and every logged winner.
pub fn drawn_numbers(winners: &[WinnerRow]) -> String {
  let draws = table(
    &["Data", "Número Sorteado"],
    draw_history(winners)
      .into_iter()
      .map(|(at, n)| vec![format_dt(at), n.to_string()]),
  );
  let winner_table = table(
    &["Data", "Nome", "CPF", "Email", "Número de Aposta"],
    winners.iter().map(|w| {
      vec![
        format_dt(w.drawn_at),
        w.full_name.clone(),
        w.national_id.clone(),
        w.email.clone(),
        w.bet_number.to_string(),
      ]
    }),
  );

  layout(
    "Números Sorteados",
    TABLE_STYLE,
    &format!(
      r#"  <div class="container mt-5">
    <div class="row">
      <div class="col-md-6">
        <h2 class="text-center">Histórico de Números Sorteados</h2>
        {draws}
      </div>
      <div class="col-md-6">
        <h2 class="text-center">Histórico de Ganhadores Sorteados</h2>
        {winner_table}
      </div>
    </div>
  </div>"#
    ),
  )
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn winner(name: &str, number: i64, minute: u32) -> WinnerRow {
    WinnerRow {
      drawn_at:    Utc.with_ymd_and_hms(2024, 1, 2, 3, minute, 0).unwrap(),
      full_name:   name.into(),
      national_id: format!("cpf-{name}"),
      email:       format!("{name}@x.com"),
      bet_number:  BetNumber::new(number).unwrap(),
    }
  }

  #[test]
  fn escapes_markup() {
    assert_eq!(esc("<b>&\"x\""), "&lt;b&gt;&amp;&quot;x&quot;");
  }

  #[test]
  fn every_page_has_the_navigation() {
    for page in [home(), register_form(), registrations(&[]), drawn_numbers(&[])] {
      for (href, _) in NAV {
        assert!(page.contains(&format!("href=\"{href}\"")), "missing {href}");
      }
    }
  }

  #[test]
  fn registration_rows_are_escaped() {
    let bet = BetRegistration {
      id:            1,
      registered_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
      full_name:     "<script>alert(1)</script>".into(),
      national_id:   "111".into(),
      email:         "a@x.com".into(),
      bet_number:    BetNumber::new(42).unwrap(),
    };
    let html = registrations(&[bet]);
    assert!(!html.contains("<script>alert(1)"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("<td>2024-01-02 03:04:05 UTC</td>"));
    assert!(html.contains("<td>42</td>"));
  }

  #[test]
  fn draw_history_collapses_rows_of_one_draw() {
    let rows = [winner("ana", 42, 0), winner("caio", 42, 0), winner("bia", 7, 1)];
    let draws = draw_history(&rows);
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0].1.get(), 42);
    assert_eq!(draws[1].1.get(), 7);
  }

  #[test]
  fn same_number_in_separate_draws_is_listed_twice() {
    let rows = [winner("ana", 42, 0), winner("ana", 42, 5)];
    assert_eq!(draw_history(&rows).len(), 2);
  }
}
