use crate::schedule::{ScheduleTemplate, is_sentinel, weekday_name};

pub fn render_index(schedule: &ScheduleTemplate, date: &str) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &escape_html(date))
        .replace("{{TIMETABLE}}", &render_timetable(schedule))
}

pub fn render_timetable(schedule: &ScheduleTemplate) -> String {
    let mut html = String::from("<table class=\"timetable\"><thead><tr><th></th>");
    for weekday in schedule.weekdays() {
        html.push_str(&format!("<th>{}</th>", weekday_name(weekday)));
    }
    html.push_str("</tr></thead><tbody>");

    for row in schedule.rows() {
        html.push_str(&format!("<tr><th class=\"slot\">{}</th>", escape_html(&row.slot)));
        for cell in &row.cells {
            let class = match cell.as_str() {
                "BREAK" => " class=\"cell-break\"",
                other if is_sentinel(other) => " class=\"cell-empty\"",
                _ => "",
            };
            html.push_str(&format!("<td{class}>{}</td>", escape_html(cell)));
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table>");
    html
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Weekly Timetable</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Gaegu:wght@400;700&display=swap');

    :root {
      --bg-1: #ee9ca7;
      --bg-2: #a6c1ee;
      --ink: #3b3041;
      --accent: #6a447d;
      --soft: #fcecf2;
      --edge: #f5b9d3;
      --card: #ffffff;
      --shadow: 0 8px 25px rgba(162, 128, 185, 0.4);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), var(--bg-2));
      color: var(--ink);
      font-family: "Gaegu", cursive;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1100px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 28px;
    }

    h1, h2 {
      font-weight: 700;
      color: #ffffff;
      text-shadow: 0 3px 6px rgba(0, 0, 0, 0.5);
      margin: 0;
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 25px;
      transition: all 0.3s ease;
    }

    .card:hover {
      transform: translateY(-5px);
    }

    .timetable {
      width: 100%;
      border-collapse: collapse;
      font-size: 1.3rem;
    }

    .timetable th, .timetable td {
      padding: 10px;
      border-bottom: 2px solid var(--edge);
      text-align: left;
    }

    .timetable thead th {
      background: var(--soft);
      color: var(--accent);
    }

    .cell-break {
      background: #fef08a;
      color: #713f12;
    }

    .cell-empty {
      background: #e5e7eb;
      color: #4b5563;
    }

    .checklist {
      display: grid;
      grid-template-columns: 4fr 2fr 2fr;
      gap: 12px 16px;
      align-items: center;
      font-size: 1.5rem;
      font-weight: 700;
    }

    .checklist .header {
      color: var(--accent);
    }

    select {
      font: inherit;
      font-size: 1.1rem;
      background: var(--soft);
      border-radius: 15px;
      border: 2px solid var(--edge);
      color: var(--ink);
      padding: 6px 10px;
    }

    .metrics {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .metric .label {
      display: block;
      color: var(--accent);
      font-weight: 700;
    }

    .metric .value {
      display: block;
      font-size: 2.5rem;
      font-weight: 700;
    }

    .summary {
      width: 100%;
      border-collapse: collapse;
      font-size: 1.2rem;
    }

    .summary th, .summary td {
      padding: 8px;
      border-bottom: 1px solid var(--edge);
      text-align: left;
    }

    #chart {
      width: 100%;
      height: 280px;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke-width: 3;
    }

    .chart-line.bby {
      stroke: #1f77b4;
    }

    .chart-line.bbu {
      stroke: #ff7f0e;
    }

    .chart-grid {
      stroke: rgba(106, 68, 125, 0.12);
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }

    .notice {
      font-size: 1.2rem;
      color: var(--accent);
    }

    .toast {
      position: fixed;
      right: 24px;
      bottom: 24px;
      background: var(--card);
      box-shadow: var(--shadow);
      border-radius: 14px;
      padding: 12px 18px;
      font-size: 1.1rem;
      opacity: 0;
      transition: opacity 200ms ease;
    }

    .toast.visible {
      opacity: 1;
    }

    .toast[data-type="error"] {
      color: #c63b2b;
    }

    [hidden] {
      display: none !important;
    }
  </style>
</head>
<body>
  <main class="app">
    <h1>🗓️ Weekly Timetable</h1>

    <section class="card">
      {{TIMETABLE}}
    </section>

    <h2>🎯 Today's Focus</h2>
    <section class="card">
      <p class="notice" id="rest-day" hidden>🎉 It's Sunday! A day for rest. No tasks scheduled.</p>
      <div class="checklist" id="checklist" data-date="{{DATE}}">
        <span class="header">Task</span>
        <span class="header">BBY</span>
        <span class="header">BBU</span>
      </div>
    </section>

    <h2>📊 Analytics &amp; Progress</h2>
    <section class="card" id="analytics">
      <p class="notice" id="no-data" hidden>No data available yet. Complete some tasks to see your progress!</p>
      <div id="month-panel" hidden>
        <label for="month">Select a month to view analytics:</label>
        <select id="month"></select>
        <p class="notice" id="no-done" hidden></p>
        <div id="summary-panel" hidden>
          <h3 id="summary-title"></h3>
          <div class="metrics">
            <div class="metric card">
              <span class="label">BBY's Total Tasks Done</span>
              <span class="value" id="bby-total">0</span>
            </div>
            <div class="metric card">
              <span class="label">BBU's Total Tasks Done</span>
              <span class="value" id="bbu-total">0</span>
            </div>
          </div>
          <table class="summary">
            <thead><tr><th>Task</th><th>BBY Completions</th><th>BBU Completions</th></tr></thead>
            <tbody id="summary-body"></tbody>
          </table>
          <h3 id="chart-title"></h3>
          <svg id="chart" viewBox="0 0 600 280" aria-label="Cumulative progress" role="img"></svg>
        </div>
      </div>
    </section>
  </main>

  <div class="toast" id="toast"></div>

  <script>
    const STATUS_OPTIONS = ['Not Done', 'Doing', 'Done'];
    const PERSONS = [
      { key: 'bby', label: 'BBY' },
      { key: 'bbu', label: 'BBU' }
    ];

    const checklistEl = document.getElementById('checklist');
    const restDayEl = document.getElementById('rest-day');
    const noDataEl = document.getElementById('no-data');
    const monthPanelEl = document.getElementById('month-panel');
    const monthEl = document.getElementById('month');
    const noDoneEl = document.getElementById('no-done');
    const summaryPanelEl = document.getElementById('summary-panel');
    const summaryTitleEl = document.getElementById('summary-title');
    const summaryBodyEl = document.getElementById('summary-body');
    const bbyTotalEl = document.getElementById('bby-total');
    const bbuTotalEl = document.getElementById('bbu-total');
    const chartTitleEl = document.getElementById('chart-title');
    const chartEl = document.getElementById('chart');
    const toastEl = document.getElementById('toast');

    let toastTimer = null;

    const toast = (message, type) => {
      toastEl.textContent = message;
      toastEl.dataset.type = type || '';
      toastEl.classList.add('visible');
      clearTimeout(toastTimer);
      toastTimer = setTimeout(() => toastEl.classList.remove('visible'), 2000);
    };

    const fetchJson = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || `Request to ${url} failed`);
      }
      return res.json();
    };

    const text = (value) => {
      const span = document.createElement('span');
      span.textContent = value;
      return span;
    };

    const statusSelect = (date, task, person, current) => {
      const select = document.createElement('select');
      select.setAttribute('aria-label', `${person.label} ${task}`);
      STATUS_OPTIONS.forEach((option) => {
        const el = document.createElement('option');
        el.value = option;
        el.textContent = option;
        el.selected = option === current;
        select.appendChild(el);
      });
      select.addEventListener('change', () => {
        const body = { date, task, person: person.key, status: select.value };
        fetchJson('/api/status', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify(body)
        })
          .then((res) => toast(`👍 ${res.message}`, res.matched ? 'ok' : 'error'))
          .catch((err) => toast(err.message, 'error'));
      });
      return select;
    };

    const loadToday = async () => {
      const view = await fetchJson('/api/today');
      if (view.rest_day) {
        restDayEl.hidden = false;
        checklistEl.hidden = true;
        return;
      }
      view.tasks.forEach((task) => {
        checklistEl.appendChild(text(task.name));
        checklistEl.appendChild(statusSelect(view.date, task.name, PERSONS[0], task.bby));
        checklistEl.appendChild(statusSelect(view.date, task.name, PERSONS[1], task.bbu));
      });
    };

    const renderChart = (points, days) => {
      const width = 600;
      const height = 280;
      const paddingX = 44;
      const paddingY = 34;
      const top = 24;

      const max = Math.max(1, ...points.map((point) => point.tasks_done));
      const xStep = days > 1 ? (width - paddingX * 2) / (days - 1) : 0;
      const scaleY = (height - top - paddingY) / max;
      const x = (day) => paddingX + (day - 1) * xStep;
      const y = (value) => height - paddingY - value * scaleY;

      let grid = '';
      const ticks = 4;
      for (let i = 0; i <= ticks; i += 1) {
        const value = (max * i) / ticks;
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${y(value)}" x2="${width - paddingX}" y2="${y(value)}" />`;
        grid += `<text class="chart-label" x="${paddingX - 10}" y="${y(value) + 4}" text-anchor="end">${Math.round(value * 10) / 10}</text>`;
      }

      const lines = PERSONS.map((person) => {
        const path = points
          .filter((point) => point.person === person.key)
          .map((point, index) => `${index === 0 ? 'M' : 'L'} ${x(point.day).toFixed(2)} ${y(point.tasks_done).toFixed(2)}`)
          .join(' ');
        return `<path class="chart-line ${person.key}" d="${path}"><title>${person.label}</title></path>`;
      }).join('');

      let labels = '';
      for (let day = 1; day <= days; day += 1) {
        if (day === 1 || day % 5 === 0) {
          labels += `<text class="chart-label" x="${x(day)}" y="${height - paddingY + 18}" text-anchor="middle">${day}</text>`;
        }
      }

      const legend = PERSONS.map((person, index) =>
        `<text class="chart-label" x="${width - paddingX - 80 + index * 40}" y="14">${person.label}</text>`
      ).join('');

      chartEl.innerHTML = `${grid}${lines}${labels}${legend}`;
    };

    const loadReport = async (month) => {
      const report = await fetchJson(`/api/analytics?month=${encodeURIComponent(month)}`);
      const anyDone = report.bby_total + report.bbu_total > 0;

      noDoneEl.hidden = anyDone;
      noDoneEl.textContent = `No tasks were marked as 'Done' in ${month}.`;
      summaryPanelEl.hidden = !anyDone;
      if (!anyDone) {
        return;
      }

      summaryTitleEl.textContent = `Monthly Summary for ${month}`;
      bbyTotalEl.textContent = report.bby_total;
      bbuTotalEl.textContent = report.bbu_total;

      summaryBodyEl.innerHTML = '';
      report.task_completions.forEach((row) => {
        const tr = document.createElement('tr');
        [row.task, row.bby, row.bbu].forEach((value) => {
          const td = document.createElement('td');
          td.textContent = value;
          tr.appendChild(td);
        });
        summaryBodyEl.appendChild(tr);
      });

      chartTitleEl.textContent = `Cumulative Progress in ${month}`;
      const days = report.cumulative.length / PERSONS.length;
      renderChart(report.cumulative, days);
    };

    const loadMonths = async () => {
      const months = await fetchJson('/api/months');
      if (!months.length) {
        noDataEl.hidden = false;
        return;
      }
      monthPanelEl.hidden = false;
      months.forEach((month) => {
        const option = document.createElement('option');
        option.value = month;
        option.textContent = month;
        monthEl.appendChild(option);
      });
      monthEl.addEventListener('change', () => {
        loadReport(monthEl.value).catch((err) => toast(err.message, 'error'));
      });
      await loadReport(months[0]);
    };

    loadToday()
      .then(loadMonths)
      .catch((err) => toast(err.message, 'error'));
  </script>
</body>
</html>
"#;
