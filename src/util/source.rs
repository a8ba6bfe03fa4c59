// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Render the line of `source` containing a given 1-indexed location,
/// followed by a caret line pointing at the column.  Tabs in the
/// excerpt are preserved in the caret line so the marker stays
/// aligned.
pub fn caret_excerpt(source: &str, line: usize, column: usize) -> String {
    let text = source.lines().nth(line.saturating_sub(1)).unwrap_or("");
    // Build the caret line underneath
    let mut caret = String::new();
    for c in text.chars().take(column.saturating_sub(1)) {
        caret.push(if c == '\t' { '\t' } else { ' ' });
    }
    caret.push('^');
    //
    format!("{}\n{}", text, caret)
}
