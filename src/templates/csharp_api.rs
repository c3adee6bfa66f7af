//! AX-015: ASP.NET Core minimal Web API (`<Project>.csproj`, `Program.cs`).

use super::{comment_line, fill, html, string_literal};
use crate::core::slug::pascal_case;
use indexmap::IndexMap;

/// Default port baked into generated services.
pub const DEFAULT_PORT: u16 = 5080;

/// Target framework moniker.
pub const TARGET_FRAMEWORK: &str = "net8.0";

/// C# project name for a slug (`hash_files` → `HashFiles`).
pub fn project_name(name: &str) -> String {
    pascal_case(name)
}

/// Render the project file and `Program.cs`, keyed by relative path.
pub fn render_api(name: &str, brief: &str) -> IndexMap<String, String> {
    let project = project_name(name);
    let port = DEFAULT_PORT.to_string();
    let vars: [(&str, &str); 7] = [
        ("PROJECT", project.as_str()),
        ("NAME_LIT", &string_literal(name)),
        ("BRIEF_XML", &html(brief)),
        ("BRIEF_COMMENT", &comment_line(brief)),
        ("BRIEF_LIT", &string_literal(brief)),
        ("PORT", &port),
        ("TFM", TARGET_FRAMEWORK),
    ];

    let mut files = IndexMap::new();
    files.insert(format!("{}.csproj", project), fill(CSPROJ, &vars));
    files.insert("Program.cs".to_string(), fill(PROGRAM_CS, &vars));
    files
}

const CSPROJ: &str = r#"<Project Sdk="Microsoft.NET.Sdk.Web">

  <PropertyGroup>
    <TargetFramework>%%TFM%%</TargetFramework>
    <Nullable>enable</Nullable>
    <ImplicitUsings>enable</ImplicitUsings>
    <RootNamespace>%%PROJECT%%</RootNamespace>
    <Description>%%BRIEF_XML%%</Description>
  </PropertyGroup>

</Project>
"#;

const PROGRAM_CS: &str = r#"// %%PROJECT%%: %%BRIEF_COMMENT%%
//
// Run:
//   PORT=%%PORT%% dotnet run

using System.Collections.Concurrent;

var builder = WebApplication.CreateBuilder(args);
var port = Environment.GetEnvironmentVariable("PORT") ?? "%%PORT%%";
builder.WebHost.UseUrls($"http://0.0.0.0:{port}");

var app = builder.Build();

const string Service = %%NAME_LIT%%;
const string Brief = %%BRIEF_LIT%%;

var items = new ConcurrentDictionary<int, Item>();
var nextId = 0;

app.MapGet("/healthz", () => Results.Ok(new { ok = true, service = Service }));

app.MapGet("/api/info", () => Results.Ok(new { service = Service, brief = Brief }));

app.MapGet("/api/items", () => Results.Ok(items.Values.OrderBy(i => i.Id)));

app.MapGet("/api/items/{id:int}", (int id) =>
    items.TryGetValue(id, out var item) ? Results.Ok(item) : Results.NotFound());

app.MapPost("/api/items", (NewItem body) =>
{
    if (string.IsNullOrWhiteSpace(body.Name))
    {
        return Results.BadRequest(new { ok = false, err = "missing name" });
    }
    var id = Interlocked.Increment(ref nextId);
    var item = new Item(id, body.Name.Trim());
    items[id] = item;
    return Results.Created($"/api/items/{id}", item);
});

app.MapDelete("/api/items/{id:int}", (int id) =>
    items.TryRemove(id, out _) ? Results.NoContent() : Results.NotFound());

app.Run();

record Item(int Id, string Name);

record NewItem(string? Name);
"#;
