//! Server-rendered HTML pages. Every user-controlled string goes through
//! [`html_escape`].

use crate::db::{DocumentRow, DocumentSummary};
use crate::pipeline::IngestOutcome;
use crate::sanitize::html_escape;

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        html_escape(title),
        body
    )
}

pub fn index_page() -> String {
    layout(
        "Document Categorizer",
        "<h1>Upload a Document</h1>\n\
         <form action=\"/upload\" method=\"post\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" name=\"file\" accept=\".pdf,image/*\">\n\
         <button type=\"submit\">Upload</button>\n\
         </form>\n\
         <p><a href=\"/dashboard\">Go to Dashboard</a></p>",
    )
}

pub fn upload_result_page(outcome: &IngestOutcome) -> String {
    layout(
        &outcome.filename,
        &format!(
            "<h2>Extracted Text:</h2>\n<pre>{}</pre>\n\
             <h2>Predicted Category:</h2>\n<p>{}</p>\n\
             <a href=\"/dashboard\">Go to Dashboard</a>",
            html_escape(&outcome.extracted_text),
            html_escape(outcome.category.as_str()),
        ),
    )
}

pub fn dashboard_page(documents: &[DocumentSummary]) -> String {
    let items: String = documents
        .iter()
        .map(|doc| {
            format!(
                "<li>{} - <b>{}</b> [<a href=\"/view/{}\">View</a>]</li>\n",
                html_escape(&doc.filename),
                html_escape(&doc.category),
                doc.id
            )
        })
        .collect();

    layout(
        "Document Dashboard",
        &format!(
            "<h1>Document Dashboard</h1>\n<ul>\n{}</ul>\n<a href=\"/\">Upload More</a>",
            items
        ),
    )
}

pub fn document_page(doc: &DocumentRow) -> String {
    layout(
        &doc.filename,
        &format!(
            "<h2>File: {}</h2>\n<h3>Category: {}</h3>\n<pre>{}</pre>\n\
             <a href=\"/dashboard\">Back to Dashboard</a>",
            html_escape(&doc.filename),
            html_escape(&doc.category),
            html_escape(&doc.extracted_text),
        ),
    )
}
